/// Packed bit grid, one bit per module, row-major.
///
/// Bit `i = y * width + x` lives in byte `i / 8` at bit position `i % 8`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-zero matrix with the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Pack a square grid given as one byte per module (non-zero = dark).
    pub fn from_modules(side: usize, modules: &[u8]) -> Self {
        debug_assert_eq!(modules.len(), side * side);
        let mut matrix = Self::new(side, side);
        for (i, _) in modules.iter().enumerate().filter(|&(_, &m)| m != 0) {
            matrix.data[i >> 3] |= 1 << (i & 7);
        }
        matrix
    }

    /// Unpack into one byte (0 or 1) per module.
    pub fn to_modules(&self) -> Vec<u8> {
        (0..self.width * self.height)
            .map(|i| (self.data[i >> 3] >> (i & 7)) & 1)
            .collect()
    }

    /// Mirror across the main diagonal.
    pub fn transposed(&self) -> Self {
        let mut flipped = Self::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    flipped.set(y, x, true);
                }
            }
        }
        flipped
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index >> 3] >> (index & 7)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index >> 3] |= 1 << (index & 7);
        } else {
            self.data[index >> 3] &= !(1 << (index & 7));
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index >> 3] ^= 1 << (index & 7);
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
