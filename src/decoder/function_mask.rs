use crate::models::{BitMatrix, modules_per_side};
use crate::tables::alignment_pattern_positions;

/// Reserved (non-data) modules of a symbol version.
/// true = function module, false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
    version: u8,
}

impl FunctionMask {
    /// Mark finders, separators, timing, alignment, format and version areas.
    pub fn new(version: u8) -> Self {
        let size = modules_per_side(version as u32);
        let mut mask = BitMatrix::new(size, size);

        // Finder patterns + separators
        Self::mark_finder_area(&mut mask, 0, 0);
        Self::mark_finder_area(&mut mask, size - 7, 0);
        Self::mark_finder_area(&mut mask, 0, size - 7);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        for (cx, cy) in alignment_pattern_positions(version) {
            Self::mark_square(&mut mask, cx - 2, cy - 2, 5);
        }

        // Format info areas
        for i in 0..9 {
            mask.set(8, i, true);
            mask.set(i, 8, true);
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
            mask.set(8, size - 1 - i, true);
        }

        // Version info (v7+)
        if version >= 7 {
            for dy in 0..6 {
                for dx in 0..3 {
                    mask.set(size - 11 + dx, dy, true);
                    mask.set(dy, size - 11 + dx, true);
                }
            }
        }

        Self { mask, version }
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Version the mask was built for.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Module at (x, y) is reserved.
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Modules left for codewords and remainder bits.
    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.mask.count_ones()
    }

    fn mark_finder_area(mask: &mut BitMatrix, x: usize, y: usize) {
        let size = mask.width();
        let start_x = x.saturating_sub(1);
        let start_y = y.saturating_sub(1);
        let end_x = (x + 8).min(size);
        let end_y = (y + 8).min(size);
        for yy in start_y..end_y {
            for xx in start_x..end_x {
                mask.set(xx, yy, true);
            }
        }
    }

    fn mark_square(mask: &mut BitMatrix, left: usize, top: usize, side: usize) {
        for y in top..top + side {
            for x in left..left + side {
                mask.set(x, y, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::total_raw_data_modules;

    #[test]
    fn test_data_modules_match_capacity() {
        for version in 1..=40u8 {
            let mask = FunctionMask::new(version);
            assert_eq!(mask.data_modules_count(), total_raw_data_modules(version));
        }
    }

    #[test]
    fn test_version_1_layout() {
        let mask = FunctionMask::new(1);
        assert_eq!(mask.size(), 21);
        assert!(mask.is_function(0, 0));
        assert!(mask.is_function(8, 8));
        assert!(mask.is_function(8, 13));
        assert!(mask.is_function(6, 10));
        assert!(!mask.is_function(9, 9));
        assert!(!mask.is_function(20, 20));
        assert!(!mask.is_function(9, 20));
    }

    #[test]
    fn test_version_info_areas() {
        let mask = FunctionMask::new(7);
        let size = mask.size();
        assert!(mask.is_function(size - 11, 0));
        assert!(mask.is_function(size - 9, 5));
        assert!(mask.is_function(5, size - 9));
        assert!(!mask.is_function(size - 12, 0));
        assert!(!FunctionMask::new(6).is_function(29, 0));
    }
}
