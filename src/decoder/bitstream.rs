//! Codeword extraction from a QR code matrix

use crate::decoder::function_mask::FunctionMask;
use crate::models::{BitMatrix, MaskPattern};
use crate::tables::total_raw_data_modules;

/// Reads data modules along the zigzag path, removing the mask on the fly
pub struct BitstreamExtractor;

impl BitstreamExtractor {
    /// Unmasked codewords, MSB first; remainder bits are dropped.
    pub fn extract_codewords(matrix: &BitMatrix, func: &FunctionMask, mask: MaskPattern) -> Vec<u8> {
        let total_bits = total_raw_data_modules(func.version()) / 8 * 8;
        let mut codewords = vec![0u8; total_bits / 8];
        let mut bit_idx = 0;

        let mut read = |x: usize, y: usize| {
            if func.is_function(x, y) || bit_idx >= total_bits {
                return;
            }
            if matrix.get(x, y) ^ mask.is_masked(y, x) {
                codewords[bit_idx >> 3] |= 0x80 >> (bit_idx & 7);
            }
            bit_idx += 1;
        };

        let dimension = func.size();
        let mut upward = true;
        let mut col = dimension - 1;
        while col > 0 {
            if col == 6 {
                col -= 1;
            }
            for step in 0..dimension {
                let row = if upward { dimension - 1 - step } else { step };
                read(col, row);
                read(col - 1, row);
            }
            upward = !upward;
            if col < 2 {
                break;
            }
            col -= 2;
        }

        codewords
    }
}
