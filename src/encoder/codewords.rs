//! Segment concatenation, padding, block split and interleaving.

use crate::encoder::reed_solomon::{compute_remainders, generate_coefficients};
use crate::encoder::segment::{BitBuffer, Segment, total_bits_used};
use crate::models::ECLevel;
use crate::tables::{block_layout, char_count_bits, total_data_codewords, total_raw_data_modules};

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Smallest version in `min..=max` whose data capacity at `level` holds the
/// segments, together with the number of bits they need there.
pub fn select_version(
    segments: &[Segment],
    level: ECLevel,
    min_version: u8,
    max_version: u8,
) -> Option<(u8, usize)> {
    (min_version..=max_version).find_map(|version| {
        let bits = total_bits_used(segments, version)?;
        let capacity = total_data_codewords(version, level) * 8;
        (bits != 0 && bits <= capacity).then_some((version, bits))
    })
}

/// Highest level whose capacity at `version` still holds `bits`, never lower
/// than `level`. Stops at the first stronger level that no longer fits.
pub fn maximize_ecc(bits: usize, version: u8, level: ECLevel) -> ECLevel {
    let mut chosen = level;
    for candidate in [ECLevel::M, ECLevel::Q, ECLevel::H] {
        if candidate <= chosen {
            continue;
        }
        if bits > total_data_codewords(version, candidate) * 8 {
            break;
        }
        chosen = candidate;
    }
    chosen
}

/// Header, terminator and pad bytes around the segments, packed MSB first.
///
/// The caller guarantees the segments fit `version` at `level`.
pub fn data_codewords(segments: &[Segment], version: u8, level: ECLevel) -> Vec<u8> {
    let capacity = total_data_codewords(version, level) * 8;
    let mut buffer = BitBuffer::with_capacity(capacity);

    for segment in segments {
        buffer.append_bits(segment.mode().indicator() as u32, 4);
        buffer.append_bits(
            segment.character_count() as u32,
            char_count_bits(segment.mode(), version),
        );
        buffer.extend_from(segment.data());
    }
    debug_assert!(buffer.len() <= capacity);

    let terminator = (capacity - buffer.len()).min(4);
    buffer.append_bits(0, terminator);
    let alignment = (8 - buffer.len() % 8) % 8;
    buffer.append_bits(0, alignment);

    for &pad in PAD_BYTES.iter().cycle() {
        if buffer.len() >= capacity {
            break;
        }
        buffer.append_bits(pad as u32, 8);
    }
    debug_assert_eq!(buffer.len(), capacity);

    buffer.to_bytes()
}

/// Split `data` into RS blocks, append each block's ECC and interleave.
///
/// Output length is `total_raw_data_modules(version) / 8`.
pub fn add_error_correction_and_interleave(data: &[u8], version: u8, level: ECLevel) -> Vec<u8> {
    let Some(layout) = block_layout(version, level) else {
        return Vec::new();
    };
    debug_assert_eq!(data.len(), layout.total_data());

    let coefficients = generate_coefficients(layout.ecc_per_block);
    let short_data_len = layout.short_block_len - layout.ecc_per_block;

    let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(layout.num_blocks);
    let mut offset = 0;
    for b in 0..layout.num_blocks {
        let len = layout.data_len(b);
        let block_data = &data[offset..offset + len];
        offset += len;

        let mut block = Vec::with_capacity(layout.short_block_len + 1);
        block.extend_from_slice(block_data);
        if b < layout.num_short_blocks {
            block.push(0);
        }
        block.extend(compute_remainders(block_data, &coefficients));
        blocks.push(block);
    }

    let mut result = Vec::with_capacity(total_raw_data_modules(version) / 8);
    for i in 0..blocks[0].len() {
        for (j, block) in blocks.iter().enumerate() {
            if i != short_data_len || j >= layout.num_short_blocks {
                result.push(block[i]);
            }
        }
    }
    debug_assert_eq!(result.len(), total_raw_data_modules(version) / 8);
    result
}
