//! Version information extraction for QR codes v7+

use crate::bch::decode_version_bits;
use crate::models::BitMatrix;

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// Version read from the top-right block, or the bottom-left one if the
    /// first cannot be corrected. `None` for grids without version info.
    pub fn extract(matrix: &BitMatrix) -> Option<u8> {
        if matrix.width() < 45 {
            return None;
        }

        decode_version_bits(Self::read_bits(matrix, false))
            .or_else(|| decode_version_bits(Self::read_bits(matrix, true)))
    }

    /// Bit i lives at (size - 11 + i % 3, i / 3), or transposed for the
    /// bottom-left copy.
    pub fn read_bits(matrix: &BitMatrix, bottom_left: bool) -> u32 {
        let size = matrix.width();
        (0..18).fold(0u32, |bits, i| {
            let a = size - 11 + i % 3;
            let b = i / 3;
            let (x, y) = if bottom_left { (b, a) } else { (a, b) };
            bits | (u32::from(matrix.get(x, y)) << i)
        })
    }
}
