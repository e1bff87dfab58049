//! QR code data mode decoders
//!
//! Each decoder reads from the start of a bit slice and returns the decoded
//! bytes with the number of bits consumed, or `None` if the slice ends early.
//! - Numeric: digits 0-9
//! - Alphanumeric: digits, upper-case letters, space and `$%*+-./:`
//! - Byte: 8-bit data (UTF-8, binary, etc.)
//! - Kanji: 13-bit Shift-JIS code points
//! - ECI: extended channel interpretation designators

/// Mode 0010
pub mod alphanumeric;
/// Mode 0100
pub mod byte;
/// Mode 0111
pub mod eci;
/// Mode 1000
pub mod kanji;
/// Mode 0001
pub mod numeric;

/// Big-endian value of `bits[start..start + count]`.
pub(crate) fn read_value(bits: &[bool], start: usize, count: usize) -> u32 {
    bits[start..start + count]
        .iter()
        .fold(0u32, |value, &bit| (value << 1) | bit as u32)
}
