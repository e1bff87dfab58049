//! Reed-Solomon error correction for QR codes
//! QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1

use crate::galois::{GF256, MAX_POLY, Poly};

/// Reed-Solomon decoder for one codeword block
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks ending in `num_ecc_codewords` ECC codewords.
    pub fn new(num_ecc_codewords: usize) -> Self {
        debug_assert!(num_ecc_codewords < MAX_POLY);
        Self { num_ecc_codewords }
    }

    /// Correct `block` (data followed by ECC) in place.
    ///
    /// Returns the number of codewords changed, or `None` if the block is
    /// still inconsistent afterwards.
    pub fn decode(&self, block: &mut [u8]) -> Option<usize> {
        let npar = self.num_ecc_codewords;
        let mut s: Poly = [0; MAX_POLY];
        if !Self::syndromes(block, npar, &mut s) {
            return Some(0);
        }

        let sigma = GF256.berlekamp_massey(&s, npar);

        // Formal derivative: odd terms shift down, even terms vanish
        let mut sigma_deriv: Poly = [0; MAX_POLY];
        for i in (0..MAX_POLY - 1).step_by(2) {
            sigma_deriv[i] = sigma[i + 1];
        }

        let omega = Self::error_evaluator(&s, &sigma, npar - 1);

        // Chien search with Forney magnitudes
        let n = block.len();
        let mut corrected = 0;
        for i in 0..n {
            let xinv = GF256.exp(GF256.order() - i);
            if GF256.poly_eval(&sigma, xinv) != 0 {
                continue;
            }
            let sd_x = GF256.poly_eval(&sigma_deriv, xinv);
            let omega_x = GF256.poly_eval(&omega, xinv);
            let error = GF256.exp(GF256.order() - GF256.log(sd_x) + GF256.log(omega_x));
            block[n - i - 1] ^= error;
            corrected += 1;
        }

        if Self::syndromes(block, npar, &mut s) {
            return None;
        }
        Some(corrected)
    }

    /// s[i] = r(alpha^i), with block[0] the highest-degree coefficient.
    fn syndromes(block: &[u8], npar: usize, s: &mut Poly) -> bool {
        *s = [0; MAX_POLY];
        let n = block.len();
        let mut nonzero = false;
        for (i, syndrome) in s.iter_mut().enumerate().take(npar) {
            for j in 0..n {
                let c = block[n - j - 1];
                if c != 0 {
                    *syndrome ^= GF256.exp(GF256.log(c) + i * j);
                }
            }
            nonzero |= *syndrome != 0;
        }
        nonzero
    }

    /// omega = sigma * S mod x^npar, with S taken from s[1..].
    fn error_evaluator(s: &Poly, sigma: &Poly, npar: usize) -> Poly {
        let mut omega: Poly = [0; MAX_POLY];
        for (i, &a) in sigma.iter().enumerate().take(npar) {
            if a == 0 {
                continue;
            }
            for j in 0..MAX_POLY - 1 {
                if i + j >= npar {
                    break;
                }
                let b = s[j + 1];
                if b != 0 {
                    omega[i + j] ^= GF256.exp(GF256.log(a) + GF256.log(b));
                }
            }
        }
        omega
    }
}
