//! Kanji mode decoder (Mode 1000)
//! Each character is 13 bits, expanded to a two-byte Shift-JIS code

use super::read_value;

/// Reads Kanji segments
pub struct KanjiDecoder;

impl KanjiDecoder {
    /// Returns (Shift-JIS bytes, bits_consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Option<(Vec<u8>, usize)> {
        let bits_needed = character_count * 13;
        if bits_needed > bits.len() {
            return None;
        }

        let mut sjis = Vec::with_capacity(character_count * 2);
        for i in 0..character_count {
            let value = read_value(bits, i * 13, 13);
            let intermediate = ((value / 0xC0) << 8) | (value % 0xC0);
            // 0x8140..=0x9FFC, then 0xE040..=0xEBBF
            let code = if intermediate + 0x8140 <= 0x9FFC {
                intermediate + 0x8140
            } else {
                intermediate + 0xC140
            };
            sjis.push((code >> 8) as u8);
            sjis.push(code as u8);
        }
        Some((sjis, bits_needed))
    }
}
