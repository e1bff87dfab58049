//! Error types for encoding and decoding.

use thiserror::Error;

use crate::models::EncodingMode;

/// Errors produced while building a QR code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Byte segments need at least one byte.
    #[error("payload is empty")]
    EmptyPayload,

    /// A character is outside the segment's character set.
    #[error("character at position {position} is not valid in {mode:?} mode")]
    InvalidCharacter {
        /// Mode the segment was built for.
        mode: EncodingMode,
        /// Byte offset of the first offending character.
        position: usize,
    },

    /// No version in the allowed range can hold the segments.
    #[error("data does not fit any version in {min_version}..={max_version}")]
    DataTooLarge {
        /// Lowest version tried.
        min_version: u8,
        /// Highest version tried.
        max_version: u8,
    },

    /// Version bounds outside 1..=40 or reversed.
    #[error("invalid version range {min}..={max}")]
    InvalidVersionRange {
        /// Requested minimum.
        min: u8,
        /// Requested maximum.
        max: u8,
    },
}

/// Errors produced while decoding a module grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Module count is not the square of a valid side length.
    #[error("invalid grid size: {0} modules")]
    InvalidGridSize(usize),

    /// Side length maps to a version outside 1..=40.
    #[error("invalid version {0}")]
    InvalidVersion(usize),

    /// Neither copy of the format information could be corrected.
    #[error("format information is not correctable")]
    FormatEcc,

    /// Version information disagrees with the symbol size.
    #[error("version information {found} does not match symbol version {expected}")]
    VersionMismatch {
        /// Version derived from the grid size.
        expected: u8,
        /// Version read from the version information field.
        found: u8,
    },

    /// Reed-Solomon correction failed for a block.
    #[error("codeword block {block} is not correctable")]
    DataEcc {
        /// Index of the failing block.
        block: usize,
    },

    /// Decoded payload would exceed the payload buffer.
    #[error("payload exceeds {capacity} bytes")]
    DataOverflow {
        /// Configured payload capacity.
        capacity: usize,
    },

    /// The bitstream ended inside a declared segment.
    #[error("bitstream ended inside a segment")]
    DataUnderflow,

    /// No numeric, alphanumeric, byte or Kanji segment was found.
    #[error("symbol carries no data segment")]
    NoDataSegment,
}

/// Errors produced while parsing a `WIFI:` configuration payload.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    /// The payload does not start with `WIFI:` or has nothing after it.
    #[error("missing WIFI: prefix")]
    InvalidPrefix,

    /// A field is shorter than its two-character tag or is not closed by `;`.
    #[error("malformed field")]
    InvalidFieldFormat,

    /// A field value is empty where required, or not one of the allowed values.
    #[error("invalid field value")]
    InvalidFieldData,

    /// A field tag other than `S:`, `T:`, `P:` or `H:`.
    #[error("unknown field type")]
    InvalidFieldType,

    /// The same field tag appears twice.
    #[error("duplicate field")]
    DuplicateFieldType,

    /// The payload does not end with `;;`.
    #[error("payload is not terminated by ;;")]
    InvalidTermination,
}
