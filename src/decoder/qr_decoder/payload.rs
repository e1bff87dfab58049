use tracing::debug;

use crate::decoder::modes::{
    alphanumeric::AlphanumericDecoder, byte::ByteDecoder, eci::EciDecoder, kanji::KanjiDecoder,
    numeric::NumericDecoder,
};
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::error::DecodeError;
use crate::models::{ECLevel, EncodingMode};
use crate::tables::{block_layout, char_count_bits};

/// Payload bytes and metadata parsed from the corrected data codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Payload {
    /// Concatenated segment data
    pub data: Vec<u8>,
    /// Highest single-bit mode indicator seen (numeric < alnum < byte < kanji)
    pub data_type: Option<EncodingMode>,
    /// First ECI designator, if any
    pub eci: Option<u32>,
}

/// Undo the interleave, correct every block and concatenate the data parts.
pub(crate) fn deinterleave_and_correct(
    codewords: &[u8],
    version: u8,
    ec_level: ECLevel,
) -> Result<Vec<u8>, DecodeError> {
    let layout = block_layout(version, ec_level).ok_or(DecodeError::InvalidVersion(version as usize))?;
    let short_data_len = layout.short_block_len - layout.ecc_per_block;

    let mut blocks: Vec<Vec<u8>> = (0..layout.num_blocks)
        .map(|b| Vec::with_capacity(layout.data_len(b) + layout.ecc_per_block))
        .collect();

    // Same column walk as the interleaver
    let mut raw = codewords.iter();
    for i in 0..=layout.short_block_len {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i == short_data_len && b < layout.num_short_blocks {
                continue;
            }
            block.push(*raw.next().ok_or(DecodeError::DataUnderflow)?);
        }
    }

    let rs = ReedSolomonDecoder::new(layout.ecc_per_block);
    let mut data_out = Vec::with_capacity(layout.total_data());
    for (b, block) in blocks.iter_mut().enumerate() {
        let corrected = rs.decode(block).ok_or(DecodeError::DataEcc { block: b })?;
        if corrected > 0 {
            debug!(block = b, corrected, "corrected codeword block");
        }
        data_out.extend_from_slice(&block[..layout.data_len(b)]);
    }

    Ok(data_out)
}

pub(crate) fn decode_payload(
    data_codewords: &[u8],
    version: u8,
    max_payload: usize,
) -> Result<Payload, DecodeError> {
    let mut bits = Vec::with_capacity(data_codewords.len() * 8);
    for &byte in data_codewords {
        for i in (0..8).rev() {
            bits.push(((byte >> i) & 1) != 0);
        }
    }

    decode_payload_from_bits(&bits, version, max_payload)
}

/// Parse segments until a terminator, an unknown mode or fewer than 4 bits.
///
/// A segment is kept only if the payload plus one reserved byte stays within
/// `max_payload`.
pub(crate) fn decode_payload_from_bits(
    bits: &[bool],
    version: u8,
    max_payload: usize,
) -> Result<Payload, DecodeError> {
    let mut reader = BitReader::new(bits);
    let mut data = Vec::new();
    let mut data_type = 0u8;
    let mut eci = None;

    while reader.remaining() >= 4 {
        let indicator = reader.read_bits(4).ok_or(DecodeError::DataUnderflow)? as u8;
        let Some(mode) = EncodingMode::from_indicator(indicator) else {
            break;
        };

        if mode == EncodingMode::Eci {
            let (designator, used) =
                EciDecoder::decode(reader.rest()).ok_or(DecodeError::DataUnderflow)?;
            reader.advance(used);
            eci = Some(designator);
            continue;
        }

        let count_bits = char_count_bits(mode, version);
        let count = reader.read_bits(count_bits).ok_or(DecodeError::DataUnderflow)? as usize;
        let new_bytes = if mode == EncodingMode::Kanji { count * 2 } else { count };
        if data.len() + new_bytes + 1 > max_payload {
            return Err(DecodeError::DataOverflow {
                capacity: max_payload,
            });
        }

        let decoded = match mode {
            EncodingMode::Numeric => NumericDecoder::decode(reader.rest(), count),
            EncodingMode::Alphanumeric => AlphanumericDecoder::decode(reader.rest(), count),
            EncodingMode::Byte => ByteDecoder::decode(reader.rest(), count),
            _ => KanjiDecoder::decode(reader.rest(), count),
        };
        let (bytes, used) = decoded.ok_or(DecodeError::DataUnderflow)?;
        reader.advance(used);
        data.extend_from_slice(&bytes);
        data_type = data_type.max(indicator);
    }

    Ok(Payload {
        data,
        data_type: EncodingMode::from_indicator(data_type),
        eci,
    })
}

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    /// Unread bits.
    fn rest(&self) -> &'a [bool] {
        &self.bits[self.idx.min(self.bits.len())..]
    }

    fn advance(&mut self, n: usize) {
        self.idx = (self.idx + n).min(self.bits.len());
    }

    fn read_bits(&mut self, n: usize) -> Option<u32> {
        if self.idx + n > self.bits.len() {
            return None;
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Some(val)
    }
}
