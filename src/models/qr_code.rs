use std::fmt;

use crate::tables;

/// Error correction level
///
/// Variants are declared in ascending order of redundancy, so `Ord` ranks
/// them L < M < Q < H. The two bits written to the format field do not
/// follow that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels, lowest redundancy first.
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Get error correction level from format bits (01=L, 00=M, 11=Q, 10=H)
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b01 => Some(ECLevel::L),
            0b00 => Some(ECLevel::M),
            0b11 => Some(ECLevel::Q),
            0b10 => Some(ECLevel::H),
            _ => None,
        }
    }

    /// Two-bit code stored in the format field.
    pub fn bits(self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Position in L, M, Q, H order; row index of the block tables.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Approximate share of codewords that can be restored.
    pub fn recovery_percent(self) -> u8 {
        match self {
            ECLevel::L => 7,
            ECLevel::M => 15,
            ECLevel::Q => 25,
            ECLevel::H => 30,
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({}%)", self, self.recovery_percent())
    }
}

/// Segment encoding mode and its 4-bit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    /// Digits 0-9
    Numeric,
    /// 0-9, A-Z, space and `$%*+-./:`
    Alphanumeric,
    /// Arbitrary 8-bit data
    Byte,
    /// Shift-JIS double-byte characters (decode only)
    Kanji,
    /// Extended channel interpretation designator (decode only)
    Eci,
    /// Not supported
    StructuredAppend,
    /// Not supported
    Fnc1,
}

impl EncodingMode {
    /// Mode indicator written in front of a segment.
    pub fn indicator(self) -> u8 {
        match self {
            EncodingMode::Numeric => 0b0001,
            EncodingMode::Alphanumeric => 0b0010,
            EncodingMode::Byte => 0b0100,
            EncodingMode::Kanji => 0b1000,
            EncodingMode::Eci => 0b0111,
            EncodingMode::StructuredAppend => 0b0011,
            EncodingMode::Fnc1 => 0b0000,
        }
    }

    /// Modes the decoder consumes. 0000 is a terminator, not FNC1.
    pub fn from_indicator(indicator: u8) -> Option<Self> {
        match indicator {
            0b0001 => Some(EncodingMode::Numeric),
            0b0010 => Some(EncodingMode::Alphanumeric),
            0b0100 => Some(EncodingMode::Byte),
            0b1000 => Some(EncodingMode::Kanji),
            0b0111 => Some(EncodingMode::Eci),
            _ => None,
        }
    }
}

/// Mask pattern (0-7), evaluated at row `i` and column `j`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight masks in indicator order.
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from the low three bits
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get((bits & 0x07) as usize).copied()
    }

    /// Three-bit mask indicator.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Check if module at row `i`, column `j` is inverted by this mask
    pub fn is_masked(self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Number of modules per side for a version, 0 if the version is invalid.
pub fn modules_per_side(version: u32) -> usize {
    if (1..=40).contains(&version) {
        4 * version as usize + 17
    } else {
        0
    }
}

/// Encoded or decoded QR code
///
/// Built in one piece by the encoder or the decoder and never mutated
/// afterwards. `modules` is row-major, one byte (0 or 1) per module.
#[derive(Debug, Clone)]
pub struct QRCode {
    data: Vec<u8>,
    encoding_mode: EncodingMode,
    error_correction: ECLevel,
    version: u8,
    modules: Vec<u8>,
    eci: Option<u32>,
}

impl QRCode {
    /// Create a QR code from its parts. Check [`QRCode::is_valid`] before use.
    pub fn new(
        data: Vec<u8>,
        encoding_mode: EncodingMode,
        error_correction: ECLevel,
        modules: Vec<u8>,
        version: u8,
    ) -> Self {
        Self {
            data,
            encoding_mode,
            error_correction,
            version,
            modules,
            eci: None,
        }
    }

    pub(crate) fn with_eci(mut self, eci: Option<u32>) -> Self {
        self.eci = eci;
        self
    }

    /// Raw payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload as text; invalid UTF-8 sequences are replaced.
    pub fn data_string(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Mode of the payload; `Byte` when segments of different modes are mixed.
    pub fn encoding_mode(&self) -> EncodingMode {
        self.encoding_mode
    }

    /// Level written in the format field.
    pub fn error_correction_capacity(&self) -> ECLevel {
        self.error_correction
    }

    /// Symbol version, 1-40.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Row-major module grid, 1 = dark.
    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    /// Side length of the module grid.
    pub fn modules_per_side(&self) -> usize {
        modules_per_side(self.version as u32)
    }

    /// ECI assignment number read from the symbol, if any.
    pub fn eci(&self) -> Option<u32> {
        self.eci
    }

    /// Module at column `x`, row `y` is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        let side = self.modules_per_side();
        x < side && y < side && self.modules[y * side + x] != 0
    }

    /// Non-empty payload, a valid version and a grid of matching size.
    pub fn is_valid(&self) -> bool {
        let side = self.modules_per_side();
        !self.data.is_empty()
            && tables::is_valid_version(self.version)
            && !self.modules.is_empty()
            && self.modules.len() == side * side
    }

    /// Same version, mode, level and payload; modules too unless ignored.
    pub fn is_same(&self, other: &QRCode, ignore_modules: bool) -> bool {
        self.version == other.version
            && self.encoding_mode == other.encoding_mode
            && self.error_correction == other.error_correction
            && self.data == other.data
            && (ignore_modules || self.modules == other.modules)
    }
}

/// A code in `codes` carries the same payload, version, mode and level as `code`.
///
/// Module grids are not compared, so the same symbol decoded twice with
/// different sampling noise still counts as present.
pub fn contains_code(codes: &[QRCode], code: &QRCode) -> bool {
    codes.iter().any(|known| known.is_same(code, true))
}

impl PartialEq for QRCode {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other, false)
    }
}

impl Eq for QRCode {}
