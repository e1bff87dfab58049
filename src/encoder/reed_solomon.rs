//! Reed-Solomon ECC generation over GF(2^8).
//!
//! Generator roots are alpha^0 .. alpha^(degree-1) with alpha = 2, reduced
//! by x^8 + x^4 + x^3 + x^2 + 1.

use crate::galois::multiply;

/// Coefficients of the monic generator polynomial of `degree`, highest
/// power first with the leading 1 dropped.
pub fn generate_coefficients(degree: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&degree));
    let mut coefficients = vec![0u8; degree];
    coefficients[degree - 1] = 1;

    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            coefficients[j] = multiply(coefficients[j], root);
            if j + 1 < degree {
                coefficients[j] ^= coefficients[j + 1];
            }
        }
        root = multiply(root, 0x02);
    }
    coefficients
}

/// Remainder of `data * x^degree` divided by the generator.
pub fn compute_remainders(data: &[u8], coefficients: &[u8]) -> Vec<u8> {
    let mut remainder = vec![0u8; coefficients.len()];
    for &codeword in data {
        let factor = codeword ^ remainder[0];
        remainder.rotate_left(1);
        if let Some(last) = remainder.last_mut() {
            *last = 0;
        }
        for (r, &c) in remainder.iter_mut().zip(coefficients) {
            *r ^= multiply(c, factor);
        }
    }
    remainder
}
