//! Tests for the inline payload codec.

use mosaic_media::MediaCodec;

// ============================================================================
// Round Trip Tests
// ============================================================================

#[test]
fn test_round_trip_sizes() {
    for len in [0usize, 1, 4096, 1 << 20] {
        let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let encoded = MediaCodec::encode(&bytes);
        assert_eq!(MediaCodec::decode(&encoded).unwrap(), bytes, "length {}", len);
    }
}

#[test]
fn test_decode_known_payload() {
    assert_eq!(MediaCodec::encode(&[1, 2, 3]), "AQID");
    assert_eq!(MediaCodec::decode("AQID").unwrap(), vec![1, 2, 3]);
}

// ============================================================================
// Tolerance Tests
// ============================================================================

#[test]
fn test_decode_strips_line_wrapping() {
    let bytes: Vec<u8> = (0..200u8).collect();
    let encoded = MediaCodec::encode(&bytes);
    let wrapped: String = encoded
        .as_bytes()
        .chunks(76)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join("\r\n");

    assert_eq!(MediaCodec::decode(&wrapped).unwrap(), bytes);
    assert_eq!(MediaCodec::decode(&format!("  {}\n", encoded)).unwrap(), bytes);
}

#[test]
fn test_decode_strips_data_url_prefix() {
    assert_eq!(
        MediaCodec::decode("data:image/jpeg;base64,AQID").unwrap(),
        vec![1, 2, 3]
    );
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[test]
fn test_malformed_payloads_rejected() {
    for payload in ["not base64!", "AQI", "A===", "data:text/plain,hello", "AQID*"] {
        assert!(MediaCodec::decode(payload).is_err(), "{:?} should fail", payload);
    }
}

#[test]
fn test_url_safe_alphabet_rejected() {
    // 0xfb 0xff encodes to "-_8=" in the URL-safe alphabet
    assert!(MediaCodec::decode("-_8=").is_err());
    assert_eq!(MediaCodec::decode("+/8=").unwrap(), vec![0xfb, 0xff]);
}

// ============================================================================
// Data URL Tests
// ============================================================================

#[test]
fn test_split_data_url() {
    assert_eq!(
        MediaCodec::split_data_url("data:image/png;base64,AQID"),
        Some((Some("image/png"), "AQID"))
    );
    assert_eq!(
        MediaCodec::split_data_url("data:;base64,AQID"),
        Some((None, "AQID"))
    );
    assert_eq!(MediaCodec::split_data_url("data:image/png,AQID"), None);
    assert_eq!(MediaCodec::split_data_url("https://example.com/a.png"), None);
}

#[test]
fn test_read_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes.bin");
    std::fs::write(&path, [9u8, 8, 7]).unwrap();

    assert_eq!(MediaCodec::read_file(&path).unwrap(), vec![9, 8, 7]);
    assert!(MediaCodec::read_file(dir.path().join("missing")).is_err());
}
