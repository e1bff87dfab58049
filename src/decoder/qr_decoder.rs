use tracing::debug;

use crate::config::DecodeOptions;
use crate::decoder::bitstream::BitstreamExtractor;
use crate::decoder::format::FormatInfo;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::version::VersionInfo;
use crate::error::DecodeError;
use crate::models::{BitMatrix, ECLevel, QRCode};
use crate::tables::{MAX_VERSION, MIN_VERSION};

mod payload;

use payload::Payload;

#[cfg(test)]
mod tests;

/// Main QR decoder - turns a square module grid back into a [`QRCode`]
pub struct QrDecoder;

impl QrDecoder {
    /// Decode a row-major grid of 0/1 modules.
    ///
    /// When the grid fails and `options.try_mirrored` is set, the transposed
    /// grid is tried as well. The first error is reported if both fail.
    pub fn decode(modules: &[u8], options: &DecodeOptions) -> Result<QRCode, DecodeError> {
        let (size, version) = Self::grid_dimensions(modules.len())?;
        let matrix = BitMatrix::from_modules(size, modules);

        let result = match Self::decode_matrix(&matrix, version, options) {
            Err(err) if options.try_mirrored => {
                debug!(%err, "retrying on the transposed grid");
                Self::decode_matrix(&matrix.transposed(), version, options).map_err(|_| err)
            }
            other => other,
        };

        let (payload, ec_level) = result?;
        let mode = payload.data_type.ok_or(DecodeError::NoDataSegment)?;
        debug!(version, level = ?ec_level, ?mode, bytes = payload.data.len(), "decoded symbol");

        let modules = modules.iter().map(|&m| u8::from(m != 0)).collect();
        Ok(QRCode::new(payload.data, mode, ec_level, modules, version).with_eci(payload.eci))
    }

    /// Side length and version implied by the module count.
    pub fn grid_dimensions(len: usize) -> Result<(usize, u8), DecodeError> {
        let size = (len as f64).sqrt().round() as usize;
        if size * size != len || size < 21 || size > 177 || (size - 17) % 4 != 0 {
            return Err(DecodeError::InvalidGridSize(len));
        }
        let version = (size - 17) / 4;
        if version < MIN_VERSION as usize || version > MAX_VERSION as usize {
            return Err(DecodeError::InvalidVersion(version));
        }
        Ok((size, version as u8))
    }

    fn decode_matrix(
        matrix: &BitMatrix,
        version: u8,
        options: &DecodeOptions,
    ) -> Result<(Payload, ECLevel), DecodeError> {
        let (format, location) = FormatInfo::extract(matrix).ok_or(DecodeError::FormatEcc)?;
        debug!(?format, ?location, "format information");

        if version >= 7 && options.check_version_info {
            if let Some(found) = VersionInfo::extract(matrix) {
                if found != version {
                    return Err(DecodeError::VersionMismatch {
                        expected: version,
                        found,
                    });
                }
            }
        }

        let func = FunctionMask::new(version);
        let codewords = BitstreamExtractor::extract_codewords(matrix, &func, format.mask_pattern);
        let data = payload::deinterleave_and_correct(&codewords, version, format.ec_level)?;
        let parsed = payload::decode_payload(&data, version, options.max_payload)?;
        Ok((parsed, format.ec_level))
    }
}
