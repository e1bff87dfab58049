//! Galois field arithmetic shared by the encoder and the decoder.
//!
//! GF(2^8) (primitive polynomial x^8 + x^4 + x^3 + x^2 + 1, 0x11D) backs the
//! Reed-Solomon codewords. GF(2^4) (x^4 + x + 1) backs the error correction
//! of the 15-bit format field.

/// Capacity of the fixed-size polynomials used by the decoder.
pub const MAX_POLY: usize = 64;

/// Polynomial with coefficients in ascending order of degree.
pub type Poly = [u8; MAX_POLY];

/// Log/exp table pair describing one field.
pub struct GaloisField {
    order: usize,
    exp: &'static [u8],
    log: &'static [u8],
}

static GF16_EXP: [u8; 16] = [
    0x01, 0x02, 0x04, 0x08, 0x03, 0x06, 0x0c, 0x0b, 0x05, 0x0a, 0x07, 0x0e, 0x0f, 0x0d, 0x09, 0x01,
];

static GF16_LOG: [u8; 16] = [
    0x00, 0x0f, 0x01, 0x04, 0x02, 0x08, 0x05, 0x0a, 0x03, 0x0e, 0x09, 0x07, 0x06, 0x0d, 0x0b, 0x0c,
];

static GF256_LOG: [u8; 256] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

static GF256_EXP: [u8; 256] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, 1,
];

/// GF(2^4), used for the format field.
pub static GF16: GaloisField = GaloisField {
    order: 15,
    exp: &GF16_EXP,
    log: &GF16_LOG,
};

/// GF(2^8), used for codeword blocks.
pub static GF256: GaloisField = GaloisField {
    order: 255,
    exp: &GF256_EXP,
    log: &GF256_LOG,
};

impl GaloisField {
    /// Size of the multiplicative group (15 or 255).
    pub fn order(&self) -> usize {
        self.order
    }

    /// alpha^power, reduced modulo the group order.
    pub fn exp(&self, power: usize) -> u8 {
        self.exp[power % self.order]
    }

    /// Discrete logarithm. The value for 0 is meaningless and callers skip it.
    pub fn log(&self, value: u8) -> usize {
        self.log[value as usize] as usize
    }

    /// Field product.
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp(self.log(a) + self.log(b))
    }

    /// `a` to the power `n`; 0^0 = 1.
    pub fn pow(&self, a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        self.exp(self.log(a) * (n % self.order))
    }

    /// dst += c * x^shift * src
    pub fn poly_add(&self, dst: &mut Poly, src: &Poly, c: u8, shift: usize) {
        if c == 0 {
            return;
        }
        let log_c = self.log(c);
        for (i, &v) in src.iter().enumerate() {
            let p = i + shift;
            if p >= MAX_POLY {
                break;
            }
            if v == 0 {
                continue;
            }
            dst[p] ^= self.exp(self.log(v) + log_c);
        }
    }

    /// Horner-free evaluation of `poly` at `x`.
    pub fn poly_eval(&self, poly: &Poly, x: u8) -> u8 {
        if x == 0 {
            return poly[0];
        }
        let log_x = self.log(x);
        poly.iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .fold(0u8, |sum, (i, &c)| sum ^ self.exp(self.log(c) + log_x * i))
    }

    /// Shortest LFSR (error locator) generating the first `n` syndromes.
    pub fn berlekamp_massey(&self, s: &Poly, n: usize) -> Poly {
        let mut c: Poly = [0; MAX_POLY];
        let mut b: Poly = [0; MAX_POLY];
        c[0] = 1;
        b[0] = 1;
        let mut l = 0usize;
        let mut m = 1usize;
        let mut last_discrepancy = 1u8;

        for step in 0..n {
            let mut d = s[step];
            for i in 1..=l {
                if c[i] != 0 && s[step - i] != 0 {
                    d ^= self.exp(self.log(c[i]) + self.log(s[step - i]));
                }
            }

            if d == 0 {
                m += 1;
                continue;
            }

            let mult = self.exp(self.order - self.log(last_discrepancy) + self.log(d));
            if l * 2 <= step {
                let previous = c;
                self.poly_add(&mut c, &b, mult, m);
                b = previous;
                l = step + 1 - l;
                last_discrepancy = d;
                m = 1;
            } else {
                self.poly_add(&mut c, &b, mult, m);
                m += 1;
            }
        }

        c
    }
}

/// GF(2^8) product by shift-and-reduce, independent of the tables.
pub fn multiply(x: u8, y: u8) -> u8 {
    let mut z: u32 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x11D);
        z ^= ((y as u32 >> i) & 1) * x as u32;
    }
    debug_assert!(z >> 8 == 0);
    z as u8
}
