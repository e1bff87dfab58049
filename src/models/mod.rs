/// Packed bit matrix used for function masks and grid reads
pub mod matrix;
/// The `QRCode` value object and its level, mode and mask enums
pub mod qr_code;

pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, EncodingMode, MaskPattern, QRCode, contains_code, modules_per_side};
