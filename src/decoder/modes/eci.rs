//! ECI designator decoder (Mode 0111)
//! 8, 16 or 24 bits, selected by the leading bits of the first byte

use super::read_value;

/// Reads ECI designators
pub struct EciDecoder;

impl EciDecoder {
    /// Returns (designator, bits_consumed).
    ///
    /// The designator keeps its length prefix bits, as read from the stream.
    pub fn decode(bits: &[bool]) -> Option<(u32, usize)> {
        if bits.len() < 8 {
            return None;
        }
        let first = read_value(bits, 0, 8);

        let extra = if first & 0xC0 == 0x80 {
            8
        } else if first & 0xE0 == 0xC0 {
            16
        } else {
            0
        };
        if 8 + extra > bits.len() {
            return None;
        }

        let value = (first << extra) | read_value(bits, 8, extra);
        Some((value, 8 + extra))
    }
}
