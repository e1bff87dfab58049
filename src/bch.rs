//! BCH codes protecting the format (15,5) and version (18,6) fields.

use crate::galois::{GF16, MAX_POLY, Poly};
use crate::models::{ECLevel, MaskPattern};

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0b101_0011_0111;
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;
/// XOR applied to the format field so it is never all zero.
pub const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

const FORMAT_BITS: usize = 15;
const FORMAT_SYNDROMES: usize = 6;

/// Remainder of `data` divided by `generator` for an (n, k) BCH code.
///
/// `data` already holds the k message bits shifted up by n - k.
pub fn bch_remainder(data: u32, block_len: u32, data_len: u32, generator: u32) -> u32 {
    debug_assert!(block_len > data_len && data >> block_len == 0);
    let ecc_bits = block_len - data_len;
    let mut remainder = data;
    for shift in (0..data_len).rev() {
        if remainder & (1 << (shift + ecc_bits)) != 0 {
            remainder ^= generator << shift;
        }
    }
    debug_assert!(remainder < generator);
    remainder
}

/// Encode a 5-bit format value (level bits << 3 | mask) into the masked 15-bit field.
pub fn encode_format(format: u8) -> u16 {
    debug_assert!(format >> 5 == 0);
    let data = (format as u32) << 10;
    let unmasked = data ^ bch_remainder(data, 15, 5, FORMAT_GENERATOR);
    unmasked as u16 ^ FORMAT_MASK
}

/// Masked 15-bit format field for a level and mask.
pub fn encode_format_bits(level: ECLevel, mask: MaskPattern) -> u16 {
    encode_format(level.bits() << 3 | mask.index())
}

/// Nearest valid format field by Hamming distance.
///
/// Succeeds only for a unique closest match within distance 3.
pub fn decode_format_bits(bits: u16) -> Option<(ECLevel, MaskPattern)> {
    debug_assert!(bits >> 15 == 0);
    let format = nearest_match(0..32u32, 4, |reference| {
        (bits ^ encode_format(reference as u8)).count_ones()
    })? as u8;
    Some((ECLevel::from_bits(format >> 3)?, MaskPattern::from_bits(format)?))
}

/// Encode a version number into its 18-bit field.
pub fn encode_version_bits(version: u8) -> u32 {
    debug_assert!((1..=40).contains(&version));
    let data = (version as u32) << 12;
    data ^ bch_remainder(data, 18, 6, VERSION_GENERATOR)
}

/// Nearest version 1-40 by Hamming distance.
///
/// Succeeds only for a unique closest match within distance 4. Versions 1-6
/// never carry this field, but the arithmetic accepts them.
pub fn decode_version_bits(bits: u32) -> Option<u8> {
    debug_assert!(bits >> 18 == 0);
    nearest_match(1..=40u32, 5, |reference| {
        (bits ^ encode_version_bits(reference as u8)).count_ones()
    })
    .map(|v| v as u8)
}

fn nearest_match(
    candidates: impl Iterator<Item = u32>,
    max_distance_exclusive: u32,
    distance: impl Fn(u32) -> u32,
) -> Option<u32> {
    let mut best = None;
    let mut best_distance = u32::MAX;
    let mut ties = 0;
    for candidate in candidates {
        let d = distance(candidate);
        if d < best_distance {
            best_distance = d;
            best = Some(candidate);
            ties = 1;
        } else if d == best_distance {
            ties += 1;
        }
    }
    if ties != 1 || best_distance >= max_distance_exclusive {
        return None;
    }
    best
}

fn format_syndromes(u: u16, s: &mut Poly) -> bool {
    *s = [0; MAX_POLY];
    let mut nonzero = false;
    for (i, slot) in s.iter_mut().enumerate().take(FORMAT_SYNDROMES) {
        for j in (0..FORMAT_BITS).filter(|&j| u & (1 << j) != 0) {
            *slot ^= GF16.exp((i + 1) * j);
        }
        nonzero |= *slot != 0;
    }
    nonzero
}

/// Algebraic correction of an unmasked 15-bit format codeword over GF(2^4).
///
/// Corrects up to three bit errors; returns `None` when the result is still
/// not a codeword.
pub fn correct_format(mut u: u16) -> Option<u16> {
    let mut s: Poly = [0; MAX_POLY];
    if !format_syndromes(u, &mut s) {
        return Some(u);
    }

    let sigma = GF16.berlekamp_massey(&s, FORMAT_SYNDROMES);
    for i in 0..FORMAT_BITS {
        if GF16.poly_eval(&sigma, GF16.exp(GF16.order() - i)) == 0 {
            u ^= 1 << i;
        }
    }

    if format_syndromes(u, &mut s) {
        return None;
    }
    Some(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_patterns(bits: u32, max_weight: u32) -> Vec<u32> {
        (1u32..(1 << bits))
            .filter(|p| p.count_ones() <= max_weight)
            .collect()
    }

    #[test]
    fn test_known_format_fields() {
        // Annex C: level M (00), mask 5 (101)
        assert_eq!(encode_format(0b00101), 0b100_0000_1100_1110);
        assert_eq!(encode_format_bits(ECLevel::L, MaskPattern::Pattern0), 0x77C4);
        assert_eq!(encode_format_bits(ECLevel::H, MaskPattern::Pattern7), 0x083B);
    }

    #[test]
    fn test_known_version_fields() {
        // Annex D: version 7
        assert_eq!(encode_version_bits(7), 0b00_0111_1100_1001_0100);
        assert_eq!(encode_version_bits(40), 0x28C69);
    }

    #[test]
    fn test_format_decode_corrects_three_errors() {
        let patterns = error_patterns(15, 3);
        for level in ECLevel::ALL {
            for mask in MaskPattern::ALL {
                let bits = encode_format_bits(level, mask);
                assert_eq!(decode_format_bits(bits), Some((level, mask)));
                for &p in &patterns {
                    assert_eq!(decode_format_bits(bits ^ p as u16), Some((level, mask)));
                }
            }
        }
    }

    #[test]
    fn test_format_decode_rejects_ambiguous_four_errors() {
        // Two codewords 8 apart; flipping half the differing bits of one
        // leaves the word exactly 4 from both.
        let codewords: Vec<u16> = (0..32).map(encode_format).collect();
        let (a, b) = codewords
            .iter()
            .flat_map(|&a| codewords.iter().map(move |&b| (a, b)))
            .find(|&(a, b)| (a ^ b).count_ones() == 8)
            .expect("the (15,5) code has codewords at distance 8");

        let diff = a ^ b;
        let mut flip = 0u16;
        let mut taken = 0;
        for i in 0..15 {
            if diff & (1 << i) != 0 && taken < 4 {
                flip |= 1 << i;
                taken += 1;
            }
        }
        let corrupted = a ^ flip;
        assert_eq!((corrupted ^ a).count_ones(), 4);
        assert_eq!((corrupted ^ b).count_ones(), 4);
        assert_eq!(decode_format_bits(corrupted), None);
    }

    #[test]
    fn test_version_decode_corrects_three_errors() {
        let patterns = error_patterns(18, 3);
        for version in 7..=40u8 {
            let bits = encode_version_bits(version);
            assert_eq!(decode_version_bits(bits), Some(version));
            for &p in patterns.iter().step_by(5) {
                assert_eq!(decode_version_bits(bits ^ p), Some(version));
            }
        }
    }

    #[test]
    fn test_version_decode_never_misreads_four_errors() {
        // Four flips are either recovered or reported as ambiguous.
        let four_bit: Vec<u32> = (1u32..(1 << 18)).filter(|p| p.count_ones() == 4).collect();
        let mut recovered = 0;
        for version in [7u8, 21, 40] {
            let bits = encode_version_bits(version);
            for &p in &four_bit {
                if let Some(v) = decode_version_bits(bits ^ p) {
                    assert_eq!(v, version);
                    recovered += 1;
                }
            }
        }
        assert!(recovered > 0);
    }

    #[test]
    fn test_version_decode_accepts_small_versions() {
        for version in 1..=6u8 {
            assert_eq!(decode_version_bits(encode_version_bits(version)), Some(version));
        }
    }

    #[test]
    fn test_algebraic_format_correction() {
        let patterns = error_patterns(15, 3);
        for format in 0..32u8 {
            let clean = encode_format(format) ^ FORMAT_MASK;
            assert_eq!(correct_format(clean), Some(clean));
            for &p in &patterns {
                assert_eq!(
                    correct_format(clean ^ p as u16),
                    Some(clean),
                    "format {format} errors {p:015b}"
                );
            }
        }
    }
}
