/// Version selection, padding and block interleaving
pub mod codewords;
/// Data masking and penalty scoring
pub mod mask;
/// Module grid drawing and codeword placement
pub mod matrix;
/// ECC codeword generation
pub mod reed_solomon;
/// Bit buffers and data segments
pub mod segment;

use tracing::debug;

use crate::config::EncodeOptions;
use crate::error::EncodeError;
use crate::models::{ECLevel, EncodingMode, QRCode};

use codewords::{add_error_correction_and_interleave, data_codewords, maximize_ecc, select_version};
use mask::apply_best_mask;
use matrix::ModuleGrid;
pub use segment::{BitBuffer, Segment, is_alphanumeric_data, is_numeric_data};

/// Encode text in the most compact of numeric, alphanumeric or byte mode.
pub fn encode_text(text: &str, level: ECLevel) -> Result<QRCode, EncodeError> {
    let segment = Segment::for_text(text)?;
    encode_segments(&[segment], level, &EncodeOptions::default())
}

/// Encode arbitrary bytes in byte mode.
pub fn encode_binary(data: &[u8], level: ECLevel) -> Result<QRCode, EncodeError> {
    let segment = Segment::bytes(data)?;
    encode_segments(&[segment], level, &EncodeOptions::default())
}

/// Encode a list of segments into a complete symbol.
///
/// Picks the smallest version in the allowed range, optionally raises the
/// ECC level, renders the grid and applies the fixed or best mask.
pub fn encode_segments(
    segments: &[Segment],
    level: ECLevel,
    options: &EncodeOptions,
) -> Result<QRCode, EncodeError> {
    options.validate()?;
    if segments.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }

    let (version, bits) = select_version(segments, level, options.min_version, options.max_version)
        .ok_or(EncodeError::DataTooLarge {
            min_version: options.min_version,
            max_version: options.max_version,
        })?;

    let level = if options.maximize_ecc {
        maximize_ecc(bits, version, level)
    } else {
        level
    };

    let data = data_codewords(segments, version, level);
    let codewords = add_error_correction_and_interleave(&data, version, level);

    let mut grid = ModuleGrid::new(version, level);
    grid.set_codewords(&codewords);
    let mask = apply_best_mask(&mut grid, level, options.mask);

    debug!(version, ?level, mask = mask.index(), bits, "encoded symbol");

    Ok(QRCode::new(
        segment_payload(segments),
        reported_mode(segments),
        level,
        grid.into_modules(),
        version,
    ))
}

/// Bytes the decoder will hand back for these segments.
fn segment_payload(segments: &[Segment]) -> Vec<u8> {
    segments.iter().flat_map(|s| s.payload().iter().copied()).collect()
}

fn reported_mode(segments: &[Segment]) -> EncodingMode {
    let first = segments[0].mode();
    if segments.iter().all(|s| s.mode() == first) {
        first
    } else {
        EncodingMode::Byte
    }
}
