//! Encoder options and environment-driven decoder tunables.

use std::sync::OnceLock;

use crate::error::EncodeError;
use crate::models::MaskPattern;
use crate::tables::{MAX_VERSION, MIN_VERSION};

/// Payload buffer size of the decoder, in bytes.
pub const DEFAULT_MAX_PAYLOAD: usize = 8896;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static MAX_PAYLOAD: OnceLock<usize> = OnceLock::new();

pub(crate) fn max_payload() -> usize {
    *MAX_PAYLOAD.get_or_init(|| parse_env_usize("QR_MAX_PAYLOAD", DEFAULT_MAX_PAYLOAD).max(1))
}

static DECODE_MIRRORED: OnceLock<bool> = OnceLock::new();

pub(crate) fn decode_mirrored() -> bool {
    *DECODE_MIRRORED.get_or_init(|| parse_env_bool_u8("QR_DECODE_MIRRORED", true))
}

static CHECK_VERSION_INFO: OnceLock<bool> = OnceLock::new();

pub(crate) fn check_version_info() -> bool {
    *CHECK_VERSION_INFO.get_or_init(|| parse_env_bool_u8("QR_CHECK_VERSION_INFO", true))
}

/// Knobs for [`crate::encode_segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Smallest version to consider.
    pub min_version: u8,
    /// Largest version to consider.
    pub max_version: u8,
    /// Fixed mask; `None` runs the penalty search.
    pub mask: Option<MaskPattern>,
    /// Raise the ECC level while the payload still fits the chosen version.
    pub maximize_ecc: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            min_version: MIN_VERSION,
            max_version: MAX_VERSION,
            mask: None,
            maximize_ecc: true,
        }
    }
}

impl EncodeOptions {
    /// Restrict the version search to `min_version..=max_version`.
    pub fn with_versions(mut self, min_version: u8, max_version: u8) -> Self {
        self.min_version = min_version;
        self.max_version = max_version;
        self
    }

    /// Use `mask` instead of the lowest-penalty one.
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Raise the level when the data still fits the chosen version.
    pub fn with_maximize_ecc(mut self, maximize_ecc: bool) -> Self {
        self.maximize_ecc = maximize_ecc;
        self
    }

    /// Both bounds in 1..=40 and `min_version <= max_version`.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.min_version < MIN_VERSION
            || self.max_version > MAX_VERSION
            || self.min_version > self.max_version
        {
            return Err(EncodeError::InvalidVersionRange {
                min: self.min_version,
                max: self.max_version,
            });
        }
        Ok(())
    }
}

/// Knobs for [`crate::decode_qr_code_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Payload capacity in bytes; one byte is always held in reserve.
    pub max_payload: usize,
    /// Retry on the transposed grid when the first attempt fails.
    pub try_mirrored: bool,
    /// Compare the version field (v7+) with the size-derived version.
    pub check_version_info: bool,
}

impl DecodeOptions {
    /// Read `QR_MAX_PAYLOAD`, `QR_DECODE_MIRRORED` and `QR_CHECK_VERSION_INFO`.
    pub fn from_env() -> Self {
        Self {
            max_payload: max_payload(),
            try_mirrored: decode_mirrored(),
            check_version_info: check_version_info(),
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_payload: DEFAULT_MAX_PAYLOAD,
            try_mirrored: true,
            check_version_info: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_options_default() {
        let options = EncodeOptions::default();
        assert_eq!((options.min_version, options.max_version), (1, 40));
        assert!(options.mask.is_none());
        assert!(options.maximize_ecc);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_encode_options_rejects_bad_ranges() {
        for (min, max) in [(0, 10), (5, 41), (12, 11)] {
            let options = EncodeOptions::default().with_versions(min, max);
            assert_eq!(
                options.validate(),
                Err(EncodeError::InvalidVersionRange { min, max })
            );
        }
    }
}
