//! Numeric mode decoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use super::read_value;

/// Reads numeric segments
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode numeric data from bit stream
    /// Returns (ASCII digits, bits_consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let mut digits = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let bits_needed = group_size * 3 + 1;
            if bit_idx + bits_needed > bits.len() {
                return None;
            }

            // Out-of-range groups (>= 1000) keep their low decimal digits
            let mut value = read_value(bits, bit_idx, bits_needed);
            let start = digits.len();
            digits.resize(start + group_size, b'0');
            for slot in digits[start..].iter_mut().rev() {
                *slot = b'0' + (value % 10) as u8;
                value /= 10;
            }

            bit_idx += bits_needed;
            chars_remaining -= group_size;
        }

        Some((digits, bit_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(text: &str) -> Vec<bool> {
        text.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_numeric_decode() {
        // 012 345 67
        let bits = bits_of("000000110001010110011000011");
        let (decoded, used) = NumericDecoder::decode(&bits, 8).unwrap();
        assert_eq!(decoded, b"01234567");
        assert_eq!(used, 27);
    }

    #[test]
    fn test_single_digit_group() {
        let (decoded, used) = NumericDecoder::decode(&bits_of("1001"), 1).unwrap();
        assert_eq!(decoded, b"9");
        assert_eq!(used, 4);
    }

    #[test]
    fn test_oversized_group_wraps() {
        // 1017 does not fit three digits
        let bits = bits_of("1111111001");
        let (decoded, _) = NumericDecoder::decode(&bits, 3).unwrap();
        assert_eq!(decoded, b"017");
    }

    #[test]
    fn test_underflow() {
        assert!(NumericDecoder::decode(&bits_of("000000110"), 3).is_none());
    }
}
