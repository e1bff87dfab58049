//! Format information extraction from both copies in the grid

use crate::bch::{FORMAT_MASK, correct_format};
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// Format info is 15 bits (5 data + 10 ECC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level of the symbol
    pub ec_level: ECLevel,
    /// Mask applied to the data modules
    pub mask_pattern: MaskPattern,
}

/// Which copy of the format field was readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatLocation {
    /// Around the top-left finder
    TopLeft,
    /// Split between the top-right and bottom-left finders
    Split,
}

impl FormatInfo {
    /// Read the top-left copy, falling back to the split copy.
    pub fn extract(matrix: &BitMatrix) -> Option<(Self, FormatLocation)> {
        [FormatLocation::TopLeft, FormatLocation::Split]
            .into_iter()
            .find_map(|location| {
                let raw = Self::read_bits(matrix, location);
                Self::decode(raw).map(|info| (info, location))
            })
    }

    /// Raw (still masked) 15-bit field, MSB first.
    pub fn read_bits(matrix: &BitMatrix, location: FormatLocation) -> u16 {
        let size = matrix.width();
        let mut bits: u16 = 0;
        let mut push = |x: usize, y: usize| bits = (bits << 1) | u16::from(matrix.get(x, y));

        match location {
            FormatLocation::TopLeft => {
                // Bit i sits at (XS[i], YS[i]); read from bit 14 down
                const XS: [usize; 15] = [8, 8, 8, 8, 8, 8, 8, 8, 7, 5, 4, 3, 2, 1, 0];
                const YS: [usize; 15] = [0, 1, 2, 3, 4, 5, 7, 8, 8, 8, 8, 8, 8, 8, 8];
                for i in (0..15).rev() {
                    push(XS[i], YS[i]);
                }
            }
            FormatLocation::Split => {
                for i in 0..7 {
                    push(8, size - 1 - i);
                }
                for i in 0..8 {
                    push(size - 8 + i, 8);
                }
            }
        }
        bits
    }

    /// Unmask, correct and split a raw field.
    pub fn decode(raw: u16) -> Option<Self> {
        let corrected = correct_format(raw ^ FORMAT_MASK)?;
        let data_bits = (corrected >> 10) as u8;

        Some(Self {
            ec_level: ECLevel::from_bits(data_bits >> 3)?,
            mask_pattern: MaskPattern::from_bits(data_bits)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::matrix::ModuleGrid;

    fn rendered(level: ECLevel, mask: MaskPattern) -> BitMatrix {
        let mut grid = ModuleGrid::new(3, level);
        grid.set_format_information(level, mask);
        BitMatrix::from_modules(grid.size(), grid.modules())
    }

    #[test]
    fn test_both_copies_read_back() {
        for level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let matrix = rendered(level, mask);
                let expected = crate::bch::encode_format_bits(level, mask);
                assert_eq!(FormatInfo::read_bits(&matrix, FormatLocation::TopLeft), expected);
                assert_eq!(FormatInfo::read_bits(&matrix, FormatLocation::Split), expected);
                assert_eq!(
                    FormatInfo::extract(&matrix),
                    Some((
                        FormatInfo {
                            ec_level: level,
                            mask_pattern: mask
                        },
                        FormatLocation::TopLeft
                    ))
                );
            }
        }
    }

    #[test]
    fn test_falls_back_to_split_copy() {
        let mut matrix = rendered(ECLevel::Q, MaskPattern::Pattern4);
        // Wreck five modules of the top-left copy
        for (x, y) in [(8, 0), (8, 1), (8, 2), (8, 3), (8, 4)] {
            matrix.toggle(x, y);
        }
        let (info, location) = FormatInfo::extract(&matrix).unwrap();
        assert_eq!(location, FormatLocation::Split);
        assert_eq!(info.ec_level, ECLevel::Q);
        assert_eq!(info.mask_pattern, MaskPattern::Pattern4);
    }

    #[test]
    fn test_blank_matrix_is_rejected() {
        // All-light reads as the mask constant itself, which is not a codeword
        let matrix = BitMatrix::new(21, 21);
        assert_eq!(FormatInfo::decode(FormatInfo::read_bits(&matrix, FormatLocation::TopLeft)), None);
    }
}
