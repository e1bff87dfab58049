//! Bit buffer and segment builder for numeric, alphanumeric and byte data

use crate::error::EncodeError;
use crate::models::EncodingMode;
use crate::tables::char_count_bits;

/// Alphanumeric character set, in code order
pub const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Growable sequence of bits, most significant bit appended first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `count` bits of `value`, MSB first.
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        self.bits
            .extend((0..count).rev().map(|i| (value >> i) & 1 != 0));
    }

    /// Append all bits of `other`.
    pub fn extend_from(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// No bits yet.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in append order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Pack into bytes, MSB first; a trailing partial byte is zero-filled.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, _) in self.bits.iter().enumerate().filter(|&(_, &b)| b) {
            bytes[i >> 3] |= 0x80 >> (i & 7);
        }
        bytes
    }
}

/// Non-empty and only ASCII digits.
pub fn is_numeric_data(data: &str) -> bool {
    !data.is_empty() && data.bytes().all(|b| b.is_ascii_digit())
}

/// Non-empty and only characters of [`ALPHANUMERIC_CHARSET`].
pub fn is_alphanumeric_data(data: &str) -> bool {
    !data.is_empty() && data.bytes().all(|b| alphanumeric_code(b).is_some())
}

fn alphanumeric_code(byte: u8) -> Option<u32> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&c| c == byte)
        .map(|p| p as u32)
}

/// One run of data in a single mode, without its header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: EncodingMode,
    character_count: usize,
    data: BitBuffer,
    payload: Vec<u8>,
}

impl Segment {
    /// Digits in groups of three (10 bits), a trailing pair (7) or single (4).
    pub fn numeric(digits: &str) -> Result<Self, EncodeError> {
        if let Some(position) = first_invalid(digits, |b| b.is_ascii_digit()) {
            return Err(EncodeError::InvalidCharacter {
                mode: EncodingMode::Numeric,
                position,
            });
        }

        let mut data = BitBuffer::with_capacity(digits.len() / 3 * 10 + 7);
        for chunk in digits.as_bytes().chunks(3) {
            let value = chunk
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
            data.append_bits(value, chunk.len() * 3 + 1);
        }

        Ok(Self {
            mode: EncodingMode::Numeric,
            character_count: digits.len(),
            data,
            payload: digits.as_bytes().to_vec(),
        })
    }

    /// Character pairs as `c0 * 45 + c1` in 11 bits, a trailing single in 6.
    pub fn alphanumeric(text: &str) -> Result<Self, EncodeError> {
        if let Some(position) = first_invalid(text, |b| alphanumeric_code(b).is_some()) {
            return Err(EncodeError::InvalidCharacter {
                mode: EncodingMode::Alphanumeric,
                position,
            });
        }

        let mut data = BitBuffer::with_capacity(text.len() / 2 * 11 + 6);
        for pair in text.as_bytes().chunks(2) {
            let codes = pair.iter().filter_map(|&b| alphanumeric_code(b));
            let value = codes.fold(0u32, |acc, c| acc * 45 + c);
            data.append_bits(value, if pair.len() == 2 { 11 } else { 6 });
        }

        Ok(Self {
            mode: EncodingMode::Alphanumeric,
            character_count: text.len(),
            data,
            payload: text.as_bytes().to_vec(),
        })
    }

    /// Every byte verbatim in 8 bits.
    pub fn bytes(bytes: &[u8]) -> Result<Self, EncodeError> {
        if bytes.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }

        let mut data = BitBuffer::with_capacity(bytes.len() * 8);
        for &b in bytes {
            data.append_bits(b as u32, 8);
        }

        Ok(Self {
            mode: EncodingMode::Byte,
            character_count: bytes.len(),
            data,
            payload: bytes.to_vec(),
        })
    }

    /// Numeric, alphanumeric or byte, whichever is the most compact for `text`.
    pub fn for_text(text: &str) -> Result<Self, EncodeError> {
        if is_numeric_data(text) {
            Self::numeric(text)
        } else if is_alphanumeric_data(text) {
            Self::alphanumeric(text)
        } else {
            Self::bytes(text.as_bytes())
        }
    }

    /// Mode written in the segment header.
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Characters (bytes in byte mode) in the segment.
    pub fn character_count(&self) -> usize {
        self.character_count
    }

    /// Encoded data bits, header excluded.
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Source bytes the segment was built from.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

fn first_invalid(text: &str, valid: impl Fn(u8) -> bool) -> Option<usize> {
    if text.is_empty() {
        return Some(0);
    }
    text.bytes().position(|b| !valid(b))
}

/// Header and payload bits of all segments at `version`.
///
/// `None` if a character count does not fit its count field.
pub fn total_bits_used(segments: &[Segment], version: u8) -> Option<usize> {
    let mut total = 0usize;
    for segment in segments {
        let count_bits = char_count_bits(segment.mode, version);
        if segment.character_count >= 1 << count_bits {
            return None;
        }
        total += 4 + count_bits + segment.data.len();
    }
    Some(total)
}
