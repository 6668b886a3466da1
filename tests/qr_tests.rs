use qrforge::{ECLevel, QR};

// Reads the symbol back through an independent decoder, returning the
// decoded version, format bits and content
fn decode(qr: &QR) -> (usize, u16, u16, String) {
    let img = qr.to_image(3);
    let (w, h) = (img.width() as usize, img.height() as usize);
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(w, h, |x, y| img.get_pixel(x as u32, y as u32).0[0]);
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "Expected exactly one symbol in the image");
    let (meta, content) = grids[0].decode().expect("Failed to read QR");
    (meta.version.0, meta.ecc_level, meta.mask, content)
}

fn ecl_bits(ecl: ECLevel) -> u16 {
    match ecl {
        ECLevel::L => 0b01,
        ECLevel::M => 0b00,
        ECLevel::Q => 0b11,
        ECLevel::H => 0b10,
    }
}

#[cfg(test)]
mod qr_tests {
    use test_case::test_case;

    use qrforge::{ECLevel, MaskPattern, QRBuilder, QRError, Version};

    use super::{decode, ecl_bits};

    #[test_case("Hello, world!".to_string(), ECLevel::L; "byte_l")]
    #[test_case("TEST".to_string(), ECLevel::M; "alnum_m")]
    #[test_case("12345".to_string(), ECLevel::Q; "numeric_q")]
    #[test_case("OK".to_string(), ECLevel::H; "alnum_h")]
    #[test_case("Grüße aus Köln, 東京 and 🌏".to_string(), ECLevel::M; "utf8_m")]
    #[test_case("A11111111111111".repeat(11), ECLevel::M; "alnum_repeat_m")]
    #[test_case("aAAAAAA1111111111111AAAAAAa".repeat(3), ECLevel::Q; "byte_mixed_q")]
    #[test_case("0123456789".repeat(30), ECLevel::H; "numeric_long_h")]
    #[test_case("HTTPS://EXAMPLE.COM/PATH/TO/RESOURCE?ID=42".to_string(), ECLevel::L; "byte_url_l")]
    #[test_case("The quick brown fox jumps over the lazy dog. ".repeat(20), ECLevel::L; "byte_long_l")]
    fn test_roundtrip(data: String, ecl: ECLevel) {
        let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
        let (ver, ecc, mask, decoded) = decode(&qr);

        assert_eq!(ver, *qr.version() as usize);
        assert_eq!(ecc, ecl_bits(ecl));
        assert_eq!(mask, *qr.mask().unwrap() as u16);
        assert_eq!(decoded, data);
    }

    #[test_case("Hello, world!".to_string(), 7, ECLevel::L)]
    #[test_case("1234567890".repeat(10), 10, ECLevel::M)]
    #[test_case("ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(20), 27, ECLevel::Q)]
    #[test_case("A Byte Mode Payload!".repeat(100), 40, ECLevel::L)]
    fn test_roundtrip_forced_version(data: String, ver: u8, ecl: ECLevel) {
        let version = Version::new(ver).unwrap();
        let qr = QRBuilder::new(&data).version(version).ec_level(ecl).build().unwrap();
        assert_eq!(qr.width(), version.width());

        let (decoded_ver, _, _, decoded) = decode(&qr);
        assert_eq!(decoded_ver, ver as usize);
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_roundtrip_every_mask() {
        for m in MaskPattern::ALL {
            let qr = QRBuilder::new("MASKED 0123").ec_level(ECLevel::Q).mask(m).build().unwrap();
            let (_, _, mask, decoded) = decode(&qr);
            assert_eq!(mask, *m as u16);
            assert_eq!(decoded, "MASKED 0123");
        }
    }

    // Dark outer ring, light inner ring and dark 3x3 core of the finder whose
    // top left corner is at (r0, c0)
    fn assert_finder_at(m: &[Vec<u8>], r0: usize, c0: usize) {
        for i in 0..7 {
            for j in 0..7 {
                let ring = i.min(j).min(6 - i).min(6 - j);
                let exp = if ring == 1 { 0 } else { 1 };
                assert_eq!(m[r0 + i][c0 + j], exp, "Finder at ({r0}, {c0}), module ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_short_alphanumeric_at_h() {
        let qr = QRBuilder::new("AC-42").ec_level(ECLevel::H).build().unwrap();
        assert_eq!(*qr.version(), 1);
        assert_eq!(qr.width(), 21);
        assert_eq!(decode(&qr).3, "AC-42");

        for m in MaskPattern::ALL {
            let qr = QRBuilder::new("AC-42").ec_level(ECLevel::H).mask(m).build().unwrap();
            let matrix = qr.to_matrix();
            assert_finder_at(&matrix, 0, 0);
            assert_finder_at(&matrix, 0, 14);
            assert_finder_at(&matrix, 14, 0);
            // Dark module
            assert_eq!(matrix[13][8], 1);
            assert_eq!(decode(&qr).3, "AC-42");
        }
    }

    #[test]
    fn test_numeric_at_h() {
        let data = "01234567890123456789012345678901";
        let qr = QRBuilder::new(data).ec_level(ECLevel::H).build().unwrap();
        assert_eq!(*qr.version(), 2);
        assert_eq!(qr.width(), 25);
        assert_eq!(decode(&qr).3, data);
    }

    #[test]
    fn test_max_capacity() {
        let data = "7".repeat(7089);
        let qr = QRBuilder::new(&data).ec_level(ECLevel::L).build().unwrap();
        assert_eq!(qr.version(), Version::MAX);
        assert_eq!(decode(&qr).3, data);

        let data = "7".repeat(7090);
        let res = QRBuilder::new(&data).ec_level(ECLevel::L).build();
        assert_eq!(res, Err(QRError::CapacityExceeded));
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(QRBuilder::new("").build(), Err(QRError::EmptyData));
    }

    #[test]
    fn test_deterministic() {
        let data = "Same input, same symbol";
        let a = QRBuilder::new(data).ec_level(ECLevel::H).build().unwrap();
        let b = QRBuilder::new(data).ec_level(ECLevel::H).build().unwrap();
        assert_eq!(a.to_matrix(), b.to_matrix());
        assert_eq!(a.mask(), b.mask());
    }
}

#[cfg(test)]
mod qr_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use qrforge::{ECLevel, QRBuilder};

    use super::decode;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(regex: &str, max_sz: usize) -> impl Strategy<Value = (ECLevel, String)> {
        let pattern = format!(r"{regex}{{1,{max_sz}}}");
        (ec_level_strategy(), string_regex(&pattern).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn proptest_numeric(params in qr_strategy("[0-9]", 400)) {
            let (ecl, data) = params;
            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(decode(&qr).3, data);
        }

        #[test]
        fn proptest_alphanumeric(params in qr_strategy(r"[0-9A-Z $%*+\-./:]", 300)) {
            let (ecl, data) = params;
            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(decode(&qr).3, data);
        }

        #[test]
        fn proptest_byte(params in qr_strategy("[a-z0-9!?,. ]", 200)) {
            let (ecl, data) = params;
            let qr = QRBuilder::new(&data).ec_level(ecl).build().unwrap();
            prop_assert_eq!(decode(&qr).3, data);
        }
    }
}
