//! Byte mode decoder (Mode 0100) for 8-bit data

use super::read_value;

/// Reads byte segments
pub struct ByteDecoder;

impl ByteDecoder {
    /// Bytes are returned verbatim; interpreting them is up to the caller.
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let bits_needed = character_count * 8;
        if bits_needed > bits.len() {
            return None;
        }

        let bytes = (0..character_count)
            .map(|i| read_value(bits, i * 8, 8) as u8)
            .collect();
        Some((bytes, bits_needed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_decode() {
        // "HI" in ASCII = 72, 73
        // H = 0x48 = 01001000
        // I = 0x49 = 01001001
        let bits = vec![
            false, true, false, false, true, false, false, false, // H
            false, true, false, false, true, false, false, true, // I
        ];
        let (decoded, used) = ByteDecoder::decode(&bits, 2).unwrap();
        assert_eq!(decoded, b"HI");
        assert_eq!(used, 16);
    }

    #[test]
    fn test_non_utf8_bytes_survive() {
        let bits: Vec<bool> = (0..8).map(|_| true).collect();
        assert_eq!(ByteDecoder::decode(&bits, 1), Some((vec![0xFF], 8)));
        assert_eq!(ByteDecoder::decode(&bits, 2), None);
    }
}
