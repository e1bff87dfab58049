//! QR code decoding modules
//!
//! Turns a square grid of modules back into its payload:
//! - Format and version information extraction
//! - Bitstream extraction with on-the-fly unmasking
//! - Reed-Solomon error correction
//! - Data mode decoding (numeric, alphanumeric, byte, kanji, ECI)

/// Bitstream extraction from QR matrix
pub mod bitstream;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Data mode decoders (numeric, alphanumeric, byte, kanji, ECI)
pub mod modes;
/// Main QR decoder that orchestrates the decoding pipeline
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Version information extraction (versions 7-40)
pub mod version;
