//! qr_codec - QR Code symbol encoder and module-grid decoder
//!
//! Encodes text or bytes into a Model 2 QR Code (versions 1-40, all four
//! error correction levels) and decodes an already-sampled module grid back
//! into its payload. Reed-Solomon, BCH and mask selection follow
//! ISO/IEC 18004 bit for bit, so symbols interoperate with other readers.
//!
//! Camera detection (finding and sampling a symbol in an image) is out of
//! scope: the decoder starts from a square grid of 0/1 modules.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// BCH codes for the format and version fields
pub mod bch;
/// Encoder options and decoder tunables
pub mod config;
/// QR code decoding modules (error correction, format extraction, data modes)
pub mod decoder;
/// QR code encoding modules (segments, codewords, matrix, masking)
pub mod encoder;
/// Error types
pub mod error;
/// GF(2^4) and GF(2^8) arithmetic
pub mod galois;
/// Core data structures (QRCode, BitMatrix, levels, masks)
pub mod models;
/// Text and image rendering of finished symbols
pub mod render;
/// Per-version capacity and layout tables
pub mod tables;
/// Wi-Fi network configuration payloads (`WIFI:S:...;;`)
pub mod wifi;

use rayon::prelude::*;

pub use config::{DecodeOptions, EncodeOptions};
pub use encoder::{Segment, encode_binary, encode_segments, encode_text};
pub use error::{DecodeError, EncodeError, WifiError};
pub use models::{BitMatrix, ECLevel, EncodingMode, MaskPattern, QRCode, contains_code, modules_per_side};
pub use wifi::WifiConfig;

use decoder::qr_decoder::QrDecoder;

/// Decode a row-major grid of modules (non-zero = dark)
///
/// # Arguments
/// * `modules` - `side * side` module values, top row first
///
/// # Returns
/// The decoded symbol, or the reason decoding failed
///
/// Decoder tunables are read from the environment once
/// (see [`DecodeOptions::from_env`]).
pub fn decode_qr_code(modules: &[u8]) -> Result<QRCode, DecodeError> {
    QrDecoder::decode(modules, &DecodeOptions::from_env())
}

/// Decode a module grid with explicit options
pub fn decode_qr_code_with(modules: &[u8], options: &DecodeOptions) -> Result<QRCode, DecodeError> {
    QrDecoder::decode(modules, options)
}

/// Encode many texts in parallel; results keep the input order.
pub fn encode_batch<S>(texts: &[S], level: ECLevel) -> Vec<Result<QRCode, EncodeError>>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| encode_text(text.as_ref(), level))
        .collect()
}

/// Decode many module grids in parallel; results keep the input order.
pub fn decode_batch<G>(grids: &[G], options: &DecodeOptions) -> Vec<Result<QRCode, DecodeError>>
where
    G: AsRef<[u8]> + Sync,
{
    grids
        .par_iter()
        .map(|grid| QrDecoder::decode(grid.as_ref(), options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let qr = encode_text("HELLO WORLD", ECLevel::M).unwrap();
        let decoded = decode_qr_code_with(qr.modules(), &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, qr);
    }

    #[test]
    fn test_batches_keep_order() {
        let texts = ["1", "TWO", "three", "4444"];
        let encoded: Vec<QRCode> = encode_batch(&texts, ECLevel::L)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        let grids: Vec<&[u8]> = encoded.iter().map(|qr| qr.modules()).collect();
        let decoded = decode_batch(&grids, &DecodeOptions::default());

        for (text, result) in texts.iter().zip(decoded) {
            assert_eq!(result.unwrap().data(), text.as_bytes());
        }
    }

    #[test]
    fn test_decode_batch_reports_each_failure() {
        let good = encode_text("OK", ECLevel::L).unwrap().modules().to_vec();
        let bad = vec![0u8; 10];
        let results = decode_batch(&[good, bad], &DecodeOptions::default());
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(DecodeError::InvalidGridSize(10)));
    }
}
