//! Module grid renderer: function patterns, zig-zag codeword placement and
//! the format/version fields.

use crate::bch::{encode_format_bits, encode_version_bits};
use crate::models::{BitMatrix, ECLevel, MaskPattern, modules_per_side};
use crate::tables::alignment_pattern_positions;

/// Module grid under construction plus the mask of reserved positions.
///
/// `modules` is row-major, one byte (0 or 1) per module. Positions marked in
/// `function` hold fixed patterns and are never touched by data or masking.
#[derive(Debug, Clone)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<u8>,
    function: BitMatrix,
}

impl ModuleGrid {
    /// Empty grid with timing, finder, alignment, format and version areas drawn.
    pub fn new(version: u8, level: ECLevel) -> Self {
        let size = modules_per_side(version as u32);
        debug_assert!(size != 0);
        let mut grid = Self {
            size,
            modules: vec![0; size * size],
            function: BitMatrix::new(size, size),
        };
        grid.set_function_patterns(version, level);
        grid
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major modules, 1 = dark.
    pub fn modules(&self) -> &[u8] {
        &self.modules
    }

    /// Hand over the module buffer.
    pub fn into_modules(self) -> Vec<u8> {
        self.modules
    }

    /// Module at (x, y) belongs to a function pattern.
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    /// Module at (x, y) is dark.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x] != 0
    }

    pub(crate) fn toggle(&mut self, x: usize, y: usize) {
        self.modules[y * self.size + x] ^= 1;
    }

    fn set_function_module(&mut self, x: usize, y: usize, dark: bool) {
        self.modules[y * self.size + x] = u8::from(dark);
        self.function.set(x, y, true);
    }

    fn set_function_patterns(&mut self, version: u8, level: ECLevel) {
        let size = self.size;

        for i in 8..size - 8 {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(0, 0);
        self.draw_finder_pattern(0, size - 7);
        self.draw_finder_pattern(size - 7, 0);

        // Separators stay light
        for i in 0..8 {
            self.set_function_module(7, i, false);
            self.set_function_module(size - 8, i, false);
            self.set_function_module(7, size - 8 + i, false);
            self.set_function_module(i, 7, false);
            self.set_function_module(size - 8 + i, 7, false);
            self.set_function_module(i, size - 8, false);
        }

        for (x, y) in alignment_pattern_positions(version) {
            self.draw_alignment_pattern(x, y);
        }

        // Placeholder so the area is reserved before codewords are placed
        self.set_format_information(level, MaskPattern::Pattern0);
        self.set_version_information(version);
    }

    fn draw_finder_pattern(&mut self, left: usize, top: usize) {
        for dy in 0..7usize {
            for dx in 0..7usize {
                let distance = dx.abs_diff(3).max(dy.abs_diff(3));
                self.set_function_module(left + dx, top + dy, distance != 2);
            }
        }
    }

    fn draw_alignment_pattern(&mut self, cx: usize, cy: usize) {
        for dy in 0..5usize {
            for dx in 0..5usize {
                let distance = dx.abs_diff(2).max(dy.abs_diff(2));
                self.set_function_module(cx - 2 + dx, cy - 2 + dy, distance != 1);
            }
        }
    }

    /// Both copies of the 15-bit format field, and the dark module.
    pub fn set_format_information(&mut self, level: ECLevel, mask: MaskPattern) {
        let bits = encode_format_bits(level, mask);
        let bit = |i: usize| (bits >> i) & 1 != 0;
        let size = self.size;

        // Around the top-left finder
        for i in 0..6 {
            self.set_function_module(8, i, bit(i));
        }
        self.set_function_module(8, 7, bit(6));
        self.set_function_module(8, 8, bit(7));
        self.set_function_module(7, 8, bit(8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, bit(i));
        }

        // Split across the other two finders
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, bit(i));
        }
        self.set_function_module(8, size - 8, true);
    }

    /// Two 6x3 copies of the 18-bit version field, versions 7 and up.
    pub fn set_version_information(&mut self, version: u8) {
        if version < 7 {
            return;
        }
        let bits = encode_version_bits(version);
        let size = self.size;
        for i in 0..18 {
            let dark = (bits >> i) & 1 != 0;
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, dark);
            self.set_function_module(b, a, dark);
        }
    }

    /// Place codewords MSB first along the zig-zag path. Leftover remainder
    /// modules stay light.
    pub fn set_codewords(&mut self, codewords: &[u8]) {
        let size = self.size;
        let total_bits = codewords.len() * 8;
        let mut i = 0;

        let mut right = size as isize - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let col_right = right as usize;
            let upward = (col_right + 1) & 2 == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for j in 0..2 {
                    let x = col_right - j;
                    if self.function.get(x, y) || i >= total_bits {
                        continue;
                    }
                    let dark = (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
                    self.modules[y * size + x] = u8::from(dark);
                    i += 1;
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, total_bits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::function_mask::FunctionMask;
    use crate::tables::total_raw_data_modules;

    #[test]
    fn test_finder_pattern_shape() {
        let grid = ModuleGrid::new(1, ECLevel::L);
        let row = |y: usize| -> Vec<bool> { (0..8).map(|x| grid.get(x, y)).collect() };
        assert_eq!(row(0), vec![true, true, true, true, true, true, true, false]);
        assert_eq!(row(1), vec![true, false, false, false, false, false, true, false]);
        assert_eq!(row(3), vec![true, false, true, true, true, false, true, false]);
        assert_eq!(row(7), vec![false; 8]);
    }

    #[test]
    fn test_finder_and_alignment_rings() {
        let grid = ModuleGrid::new(7, ECLevel::Q);
        let size = grid.size();
        for (left, top) in [(0, 0), (size - 7, 0), (0, size - 7)] {
            for dy in 0..7usize {
                for dx in 0..7usize {
                    let ring = dx.abs_diff(3).max(dy.abs_diff(3));
                    assert_eq!(grid.get(left + dx, top + dy), ring != 2, "finder at ({left}, {top})");
                }
            }
        }
        // Version 7 puts an alignment pattern at (22, 22)
        for dy in 0..5usize {
            for dx in 0..5usize {
                let ring = dx.abs_diff(2).max(dy.abs_diff(2));
                assert_eq!(grid.get(20 + dx, 20 + dy), ring != 1);
                assert!(grid.is_function(20 + dx, 20 + dy));
            }
        }
    }

    #[test]
    fn test_timing_and_dark_module() {
        let grid = ModuleGrid::new(2, ECLevel::M);
        let size = grid.size();
        for i in 8..size - 8 {
            assert_eq!(grid.get(6, i), i % 2 == 0);
            assert_eq!(grid.get(i, 6), i % 2 == 0);
        }
        assert!(grid.get(8, size - 8));
    }

    #[test]
    fn test_alignment_pattern_centre() {
        let grid = ModuleGrid::new(2, ECLevel::M);
        // Single alignment pattern at (18, 18)
        assert!(grid.get(18, 18));
        assert!(!grid.get(17, 18));
        assert!(grid.get(16, 18));
        assert!(grid.is_function(20, 20));
        assert!(!grid.is_function(21, 21));
    }

    #[test]
    fn test_function_area_matches_decoder_mask() {
        for version in 1..=40u8 {
            let grid = ModuleGrid::new(version, ECLevel::L);
            let mask = FunctionMask::new(version);
            let size = grid.size();
            let mut data_modules = 0;
            for y in 0..size {
                for x in 0..size {
                    assert_eq!(
                        grid.is_function(x, y),
                        mask.is_function(x, y),
                        "version {version} at ({x}, {y})"
                    );
                    data_modules += usize::from(!grid.is_function(x, y));
                }
            }
            assert_eq!(data_modules, total_raw_data_modules(version));
        }
    }

    #[test]
    fn test_version_information_blocks() {
        let grid = ModuleGrid::new(7, ECLevel::L);
        let bits = encode_version_bits(7);
        let size = grid.size();
        for i in 0..18 {
            let expected = (bits >> i) & 1 != 0;
            assert_eq!(grid.get(size - 11 + i % 3, i / 3), expected);
            assert_eq!(grid.get(i / 3, size - 11 + i % 3), expected);
        }
    }

    #[test]
    fn test_codewords_start_bottom_right() {
        let mut grid = ModuleGrid::new(1, ECLevel::L);
        let mut codewords = vec![0u8; 26];
        codewords[0] = 0b1010_0000;
        grid.set_codewords(&codewords);
        // First byte fills the bottom-right 2x4 block upward, right column first
        assert!(grid.get(20, 20));
        assert!(!grid.get(19, 20));
        assert!(grid.get(20, 19));
        assert!(!grid.get(19, 19));
        assert!(!grid.get(20, 18));
    }
}
