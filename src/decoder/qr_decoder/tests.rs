use super::payload::{decode_payload, decode_payload_from_bits};
use super::*;
use crate::encoder::{Segment, encode_segments, encode_text};
use crate::config::EncodeOptions;
use crate::models::{ECLevel, EncodingMode};

fn push_bits(bits: &mut Vec<bool>, value: u32, count: usize) {
    for i in (0..count).rev() {
        bits.push(((value >> i) & 1) != 0);
    }
}

fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
        })
        .collect()
}

fn transpose(modules: &[u8], size: usize) -> Vec<u8> {
    let mut out = vec![0u8; modules.len()];
    for y in 0..size {
        for x in 0..size {
            out[x * size + y] = modules[y * size + x];
        }
    }
    out
}

fn strict() -> DecodeOptions {
    DecodeOptions {
        try_mirrored: false,
        ..DecodeOptions::default()
    }
}

#[test]
fn test_golden_matrix_decode() {
    // Known-good 21x21 symbol for "4376471154038" (version 1, level M, mask 7)
    // Generated with the Python qrcode library
    let rows = [
        "111111100000101111111",
        "100000100100001000001",
        "101110100011001011101",
        "101110100010001011101",
        "101110100111101011101",
        "100000101010001000001",
        "111111101010101111111",
        "000000000100000000000",
        "100101101111110100000",
        "111010011001010101100",
        "100101111011001110001",
        "001010010000111110000",
        "001000110101011101100",
        "000000001010011110110",
        "111111100011101011110",
        "100000101000001100001",
        "101110100110111001011",
        "101110101010011110011",
        "101110100111011101001",
        "100000100111100110010",
        "111111101110010111000",
    ];
    let modules: Vec<u8> = rows
        .iter()
        .flat_map(|row| row.bytes().map(|b| b - b'0'))
        .collect();

    let qr = QrDecoder::decode(&modules, &strict()).expect("golden matrix should decode");
    assert_eq!(qr.data(), b"4376471154038");
    assert_eq!(qr.version(), 1);
    assert_eq!(qr.error_correction_capacity(), ECLevel::M);
    assert_eq!(qr.encoding_mode(), EncodingMode::Numeric);
    assert_eq!(qr.modules(), modules.as_slice());
    assert!(qr.is_valid());
}

#[test]
fn test_decode_own_encoding() {
    for (text, level) in [
        ("HELLO WORLD", ECLevel::M),
        ("01234567", ECLevel::L),
        ("lower case goes to byte mode", ECLevel::Q),
    ] {
        let encoded = encode_text(text, level).unwrap();
        let decoded = QrDecoder::decode(encoded.modules(), &strict()).unwrap();
        assert!(decoded.is_same(&encoded, false), "{text}");
        assert_eq!(decoded.eci(), None);
    }
}

#[test]
fn test_decode_version_seven_and_up() {
    let text = "A".repeat(300);
    let options = EncodeOptions::default().with_versions(7, 40);
    let encoded = encode_segments(&[Segment::for_text(&text).unwrap()], ECLevel::H, &options).unwrap();
    assert!(encoded.version() >= 7);
    let decoded = QrDecoder::decode(encoded.modules(), &strict()).unwrap();
    assert_eq!(decoded.data(), text.as_bytes());
}

#[test]
fn test_mirrored_grid_decodes_with_retry() {
    let encoded = encode_text("HELLO WORLD", ECLevel::M).unwrap();
    let size = encoded.modules_per_side();
    let mirrored = transpose(encoded.modules(), size);

    assert!(QrDecoder::decode(&mirrored, &strict()).is_err());

    let decoded = QrDecoder::decode(&mirrored, &DecodeOptions::default()).unwrap();
    assert_eq!(decoded.data(), b"HELLO WORLD");
    // The caller's grid is kept, not the transposed one
    assert_eq!(decoded.modules(), mirrored.as_slice());
}

#[test]
fn test_invalid_grid_sizes() {
    for len in [0usize, 1, 20 * 20, 22 * 22, 21 * 21 + 1, 181 * 181] {
        assert_eq!(
            QrDecoder::decode(&vec![0u8; len], &strict()).unwrap_err(),
            DecodeError::InvalidGridSize(len),
            "{len}"
        );
    }
    assert_eq!(QrDecoder::grid_dimensions(21 * 21), Ok((21, 1)));
    assert_eq!(QrDecoder::grid_dimensions(177 * 177), Ok((177, 40)));
}

#[test]
fn test_blank_grid_has_no_format() {
    assert_eq!(
        QrDecoder::decode(&[0u8; 21 * 21], &DecodeOptions::default()).unwrap_err(),
        DecodeError::FormatEcc
    );
}

#[test]
fn test_version_mismatch_is_reported() {
    let encoded = encode_segments(
        &[Segment::for_text("VERSION CHECK").unwrap()],
        ECLevel::M,
        &EncodeOptions::default().with_versions(8, 8),
    )
    .unwrap();
    let size = encoded.modules_per_side();
    let mut modules = encoded.modules().to_vec();

    // Overwrite both version blocks with the field for version 9
    let bits = crate::bch::encode_version_bits(9);
    for i in 0..18 {
        let dark = ((bits >> i) & 1) as u8;
        let (a, b) = (size - 11 + i % 3, i / 3);
        modules[b * size + a] = dark;
        modules[a * size + b] = dark;
    }

    assert_eq!(
        QrDecoder::decode(&modules, &strict()).unwrap_err(),
        DecodeError::VersionMismatch {
            expected: 8,
            found: 9
        }
    );

    let lenient = DecodeOptions {
        check_version_info: false,
        ..strict()
    };
    assert_eq!(QrDecoder::decode(&modules, &lenient).unwrap().data(), b"VERSION CHECK");
}

#[test]
fn test_corrupted_block_is_corrected() {
    let encoded = encode_text("01234567", ECLevel::M).unwrap();
    let mut modules = encoded.modules().to_vec();
    // Bottom-right corner holds the first codeword
    for (x, y) in [(20usize, 20usize), (19, 20), (20, 19)] {
        modules[y * 21 + x] ^= 1;
    }
    let decoded = QrDecoder::decode(&modules, &strict()).unwrap();
    assert_eq!(decoded.data(), b"01234567");
}

#[test]
fn test_decode_payload_byte_mode() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0100, 4); // mode
    push_bits(&mut bits, 2, 8); // count
    push_bits(&mut bits, b'H' as u32, 8);
    push_bits(&mut bits, b'I' as u32, 8);
    push_bits(&mut bits, 0, 4); // terminator

    let payload = decode_payload(&bits_to_codewords(&bits), 1, 8896).unwrap();
    assert_eq!(payload.data, b"HI");
    assert_eq!(payload.data_type, Some(EncodingMode::Byte));
    assert_eq!(payload.eci, None);
}

#[test]
fn test_decode_numeric_mode() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0001, 4);
    push_bits(&mut bits, 5, 10);
    push_bits(&mut bits, 123, 10);
    push_bits(&mut bits, 45, 7);
    push_bits(&mut bits, 0, 4);

    let payload = decode_payload(&bits_to_codewords(&bits), 1, 8896).unwrap();
    assert_eq!(payload.data, b"12345");
    assert_eq!(payload.data_type, Some(EncodingMode::Numeric));
}

#[test]
fn test_decode_alphanumeric_mode() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0010, 4);
    push_bits(&mut bits, 3, 9);
    // A=10, B=11: 10 * 45 + 11
    push_bits(&mut bits, 461, 11);
    push_bits(&mut bits, 36, 6); // space
    push_bits(&mut bits, 0, 4);

    let payload = decode_payload(&bits_to_codewords(&bits), 1, 8896).unwrap();
    assert_eq!(payload.data, b"AB ");
    assert_eq!(payload.data_type, Some(EncodingMode::Alphanumeric));
}

#[test]
fn test_decode_mixed_modes() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0001, 4);
    push_bits(&mut bits, 3, 10);
    push_bits(&mut bits, 123, 10);

    push_bits(&mut bits, 0b0100, 4);
    push_bits(&mut bits, 3, 8);
    for &b in b"ABC" {
        push_bits(&mut bits, b as u32, 8);
    }
    push_bits(&mut bits, 0, 4);

    let payload = decode_payload(&bits_to_codewords(&bits), 1, 8896).unwrap();
    assert_eq!(payload.data, b"123ABC");
    // Highest indicator wins
    assert_eq!(payload.data_type, Some(EncodingMode::Byte));
}

#[test]
fn test_decode_eci_then_bytes() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0111, 4);
    push_bits(&mut bits, 26, 8); // UTF-8
    push_bits(&mut bits, 0b0100, 4);
    push_bits(&mut bits, 2, 8);
    for &b in "é".as_bytes() {
        push_bits(&mut bits, b as u32, 8);
    }
    push_bits(&mut bits, 0, 4);

    let payload = decode_payload_from_bits(&bits, 1, 8896).unwrap();
    assert_eq!(payload.eci, Some(26));
    assert_eq!(payload.data, "é".as_bytes());
    assert_eq!(payload.data_type, Some(EncodingMode::Byte));
}

#[test]
fn test_decode_kanji_mode() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b1000, 4);
    push_bits(&mut bits, 2, 8);
    push_bits(&mut bits, 3487, 13); // 0x935F
    push_bits(&mut bits, 6826, 13); // 0xE4AA
    push_bits(&mut bits, 0, 4);

    let payload = decode_payload_from_bits(&bits, 1, 8896).unwrap();
    assert_eq!(payload.data, [0x93, 0x5F, 0xE4, 0xAA]);
    assert_eq!(payload.data_type, Some(EncodingMode::Kanji));
}

#[test]
fn test_decode_empty_data() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0, 4);

    let payload = decode_payload(&bits_to_codewords(&bits), 1, 8896).unwrap();
    assert!(payload.data.is_empty());
    assert_eq!(payload.data_type, None);
}

#[test]
fn test_unknown_mode_stops_parsing() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0100, 4);
    push_bits(&mut bits, 1, 8);
    push_bits(&mut bits, b'Z' as u32, 8);
    push_bits(&mut bits, 0b0011, 4); // structured append
    push_bits(&mut bits, 0xFFFF, 16);

    let payload = decode_payload_from_bits(&bits, 1, 8896).unwrap();
    assert_eq!(payload.data, b"Z");
}

#[test]
fn test_payload_capacity_boundary() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0100, 4);
    push_bits(&mut bits, 5, 8);
    for &b in b"12345" {
        push_bits(&mut bits, b as u32, 8);
    }

    // One byte always stays in reserve
    let payload = decode_payload_from_bits(&bits, 1, 6).unwrap();
    assert_eq!(payload.data, b"12345");
    assert_eq!(
        decode_payload_from_bits(&bits, 1, 5).unwrap_err(),
        DecodeError::DataOverflow { capacity: 5 }
    );
}

#[test]
fn test_kanji_counts_two_bytes_per_character() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b1000, 4);
    push_bits(&mut bits, 2, 8);
    push_bits(&mut bits, 3487, 13);
    push_bits(&mut bits, 3487, 13);

    assert!(decode_payload_from_bits(&bits, 1, 5).is_ok());
    assert_eq!(
        decode_payload_from_bits(&bits, 1, 4).unwrap_err(),
        DecodeError::DataOverflow { capacity: 4 }
    );
}

#[test]
fn test_truncated_segment_underflows() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0100, 4);
    push_bits(&mut bits, 4, 8);
    push_bits(&mut bits, b'A' as u32, 8);

    assert_eq!(
        decode_payload_from_bits(&bits, 1, 8896).unwrap_err(),
        DecodeError::DataUnderflow
    );
}

#[test]
fn test_count_field_underflow() {
    let mut bits = Vec::new();
    push_bits(&mut bits, 0b0001, 4);
    push_bits(&mut bits, 3, 5); // 10-bit count cut short

    assert_eq!(
        decode_payload_from_bits(&bits, 1, 8896).unwrap_err(),
        DecodeError::DataUnderflow
    );
}
