//! Version-dependent constants of ISO/IEC 18004 (Model 2, versions 1-40).

use crate::models::{ECLevel, EncodingMode};

/// Smallest symbol version.
pub const MIN_VERSION: u8 = 1;
/// Largest symbol version.
pub const MAX_VERSION: u8 = 40;

/// Error correction block parameters for one (version, level) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    /// Number of codeword blocks
    pub num_blocks: usize,
    /// ECC codewords in every block
    pub ecc_per_block: usize,
}

/// Shape of the interleaved codeword stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Number of codeword blocks
    pub num_blocks: usize,
    /// ECC codewords in every block
    pub ecc_per_block: usize,
    /// Blocks carrying one data codeword less than the rest; they come first.
    pub num_short_blocks: usize,
    /// Total codewords (data + ECC) of a short block.
    pub short_block_len: usize,
}

impl BlockLayout {
    /// Data codewords of block `block`.
    pub fn data_len(&self, block: usize) -> usize {
        let long = usize::from(block >= self.num_short_blocks);
        self.short_block_len - self.ecc_per_block + long
    }

    /// Data codewords of all blocks.
    pub fn total_data(&self) -> usize {
        (0..self.num_blocks).map(|b| self.data_len(b)).sum()
    }
}

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Version lies in 1..=40.
pub fn is_valid_version(version: u8) -> bool {
    (MIN_VERSION..=MAX_VERSION).contains(&version)
}

/// Block count and ECC length, `None` for an invalid version.
pub fn ec_block_info(version: u8, ec_level: ECLevel) -> Option<EcBlockInfo> {
    if !is_valid_version(version) {
        return None;
    }
    let idx = ec_level.ordinal();
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][version as usize];
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][version as usize];
    if ecc <= 0 || blocks <= 0 {
        return None;
    }
    Some(EcBlockInfo {
        num_blocks: blocks as usize,
        ecc_per_block: ecc as usize,
    })
}

/// Number of modules available for data and ECC bits, remainder bits included.
pub fn total_raw_data_modules(version: u8) -> usize {
    debug_assert!(is_valid_version(version));
    let v = version as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Number of 8-bit data codewords (ECC excluded) a symbol can hold.
pub fn total_data_codewords(version: u8, ec_level: ECLevel) -> usize {
    match ec_block_info(version, ec_level) {
        Some(info) => total_raw_data_modules(version) / 8 - info.ecc_per_block * info.num_blocks,
        None => 0,
    }
}

/// Short/long block split of the codeword stream, `None` for an invalid version.
pub fn block_layout(version: u8, ec_level: ECLevel) -> Option<BlockLayout> {
    let info = ec_block_info(version, ec_level)?;
    let raw_codewords = total_raw_data_modules(version) / 8;
    Some(BlockLayout {
        num_blocks: info.num_blocks,
        ecc_per_block: info.ecc_per_block,
        num_short_blocks: info.num_blocks - raw_codewords % info.num_blocks,
        short_block_len: raw_codewords / info.num_blocks,
    })
}

/// Width of the character count field, by version tier 1-9, 10-26 and 27-40.
pub fn char_count_bits(mode: EncodingMode, version: u8) -> usize {
    let tier = (version as usize + 7) / 17;
    let widths: [usize; 3] = match mode {
        EncodingMode::Numeric => [10, 12, 14],
        EncodingMode::Alphanumeric => [9, 11, 13],
        EncodingMode::Byte => [8, 16, 16],
        EncodingMode::Kanji => [8, 10, 12],
        EncodingMode::Eci | EncodingMode::StructuredAppend | EncodingMode::Fnc1 => [0, 0, 0],
    };
    widths[tier.min(2)]
}

/// Row/column coordinates shared by all alignment pattern centres.
pub fn alignment_axes(version: u8) -> Vec<usize> {
    if version <= 1 {
        return Vec::new();
    }
    let v = version as usize;
    let num_align = v / 7 + 2;
    let step = if v == 32 {
        26
    } else {
        (v * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };

    let size = v * 4 + 17;
    let mut axes = vec![6usize; num_align];
    for (i, slot) in axes.iter_mut().enumerate().skip(1) {
        *slot = size - 7 - (num_align - 1 - i) * step;
    }
    axes
}

/// Alignment pattern centres as (x, y), row-major, finder corners excluded.
pub fn alignment_pattern_positions(version: u8) -> Vec<(usize, usize)> {
    let axes = alignment_axes(version);
    let last = axes.len().saturating_sub(1);
    let mut positions = Vec::with_capacity(axes.len() * axes.len());
    for (yi, &y) in axes.iter().enumerate() {
        for (xi, &x) in axes.iter().enumerate() {
            let corner = (xi == 0 && yi == 0) || (xi == 0 && yi == last) || (xi == last && yi == 0);
            if !corner {
                positions.push((x, y));
            }
        }
    }
    positions
}
