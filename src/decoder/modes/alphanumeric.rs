//! Alphanumeric mode decoder (Mode 0010)
//! Pairs = 11 bits, single = 6 bits

use super::read_value;
use crate::encoder::segment::ALPHANUMERIC_CHARSET;

/// Reads alphanumeric segments
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Returns (ASCII characters, bits_consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(2);
            let bits_needed = if group_size == 2 { 11 } else { 6 };
            if bit_idx + bits_needed > bits.len() {
                return None;
            }

            let value = read_value(bits, bit_idx, bits_needed) as usize;
            if group_size == 2 {
                result.push(ALPHANUMERIC_CHARSET[value / 45 % 45]);
            }
            result.push(ALPHANUMERIC_CHARSET[value % 45]);

            bit_idx += bits_needed;
            chars_remaining -= group_size;
        }

        Some((result, bit_idx))
    }
}
