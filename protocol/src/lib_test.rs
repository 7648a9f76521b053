use super::*;

// =============================================================================
// HANDSHAKE
// =============================================================================

#[test]
fn handshake_for_abc_matches_wire_layout() {
    let frame = encode_handshake("abc").expect("encode should succeed");
    assert_eq!(frame, vec![0x01, 0x03, 0x61, 0x62, 0x63]);
}

#[test]
fn handshake_round_trips_session_identifier() {
    let session = "client-7f3a";
    let frame = encode_handshake(session).expect("encode should succeed");

    // Server-side view: tag, length byte, then the UTF-8 bytes.
    assert_eq!(frame[0], TAG_HANDSHAKE);
    let len = usize::from(frame[1]);
    assert_eq!(len, session.len());
    let decoded = std::str::from_utf8(&frame[2..2 + len]).expect("identifier should be utf-8");
    assert_eq!(decoded, session);
    assert_eq!(frame.len(), 2 + len);
}

#[test]
fn handshake_accepts_identifier_at_the_255_byte_limit() {
    let session = "x".repeat(255);
    let frame = encode_handshake(&session).expect("encode should succeed");
    assert_eq!(frame[1], 255);
    assert_eq!(frame.len(), 257);
}

#[test]
fn handshake_rejects_identifier_over_255_bytes() {
    let session = "x".repeat(256);
    let err = encode_handshake(&session).expect_err("encode should fail");
    assert!(matches!(err, CodecError::SessionTooLong(256)));
}

#[test]
fn handshake_limit_counts_utf8_bytes_not_characters() {
    // 128 two-byte characters encode to 256 bytes.
    let session = "é".repeat(128);
    let err = encode_handshake(&session).expect_err("encode should fail");
    assert!(matches!(err, CodecError::SessionTooLong(256)));
}

// =============================================================================
// LOOKAT
// =============================================================================

fn lookat_frame(values: [f32; 4]) -> Vec<u8> {
    let mut frame = vec![TAG_LOOKAT];
    for value in values {
        frame.extend_from_slice(&value.to_le_bytes());
    }
    frame
}

#[test]
fn lookat_decodes_four_floats() {
    let message = decode_message(&lookat_frame([1.0, 2.0, 3.0, 4.0])).expect("decode");
    assert_eq!(
        message,
        Message::Lookat {
            x: 1.0,
            y: 2.0,
            z: 3.0,
            w: 4.0
        }
    );
}

#[test]
fn lookat_preserves_bit_patterns_exactly() {
    let values = [f32::NAN, f32::INFINITY, -0.0, f32::MIN_POSITIVE];
    let message = decode_message(&lookat_frame(values)).expect("decode");
    let Message::Lookat { x, y, z, w } = message else {
        panic!("expected lookat, got {message:?}");
    };
    for (decoded, original) in [x, y, z, w].into_iter().zip(values) {
        assert_eq!(decoded.to_bits(), original.to_bits());
    }
}

#[test]
fn lookat_truncated_mid_field_is_an_error() {
    // The w field is cut one byte short.
    let frame = lookat_frame([1.0, 2.0, 3.0, 4.0]);
    let err = decode_message(&frame[..16]).expect_err("decode should fail");
    assert!(matches!(
        err,
        CodecError::Truncated {
            expected: 17,
            actual: 16
        }
    ));
}

// =============================================================================
// VIDEO
// =============================================================================

fn video_frame(rotation_y: f32, seconds: i32, length: i32, name: &[u8]) -> Vec<u8> {
    let mut frame = vec![TAG_VIDEO];
    frame.extend_from_slice(&rotation_y.to_le_bytes());
    frame.extend_from_slice(&seconds.to_le_bytes());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(name);
    frame
}

#[test]
fn video_decodes_header_and_filename() {
    let frame = video_frame(-90.5, 12, 11, b"clip_01.mp4");
    let message = decode_message(&frame).expect("decode");
    assert_eq!(
        message,
        Message::Video {
            rotation_y: -90.5,
            seconds: 12,
            length: 11,
            filename: "clip_01.mp4".to_owned()
        }
    );
}

#[test]
fn video_with_empty_filename_decodes() {
    let message = decode_message(&video_frame(0.0, 0, 0, b"")).expect("decode");
    assert_eq!(
        message,
        Message::Video {
            rotation_y: 0.0,
            seconds: 0,
            length: 0,
            filename: String::new()
        }
    );
}

#[test]
fn video_truncated_filename_is_an_error() {
    // Length field says 5, only 3 name bytes follow.
    let err = decode_message(&video_frame(1.0, 2, 5, b"abc")).expect_err("decode should fail");
    assert!(matches!(
        err,
        CodecError::Truncated {
            expected: 18,
            actual: 16
        }
    ));
}

#[test]
fn video_negative_length_is_rejected() {
    let err = decode_message(&video_frame(1.0, 2, -4, b"")).expect_err("decode should fail");
    assert!(matches!(err, CodecError::InvalidLength(-4)));
}

// =============================================================================
// ALIVE
// =============================================================================

fn alive_frame(length: i32, device: &[u8]) -> Vec<u8> {
    let mut frame = vec![TAG_ALIVE];
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(device);
    frame
}

#[test]
fn alive_decodes_device_identifier() {
    let message = decode_message(&alive_frame(4, b"dev1")).expect("decode");
    assert_eq!(
        message,
        Message::Alive {
            device_id: "dev1".to_owned()
        }
    );
}

#[test]
fn alive_high_bytes_map_to_matching_code_points() {
    // One byte per character: 0xE9 is U+00E9, never part of a UTF-8 pair.
    let message = decode_message(&alive_frame(2, &[0xE9, 0x41])).expect("decode");
    assert_eq!(
        message,
        Message::Alive {
            device_id: "\u{e9}A".to_owned()
        }
    );
}

#[test]
fn alive_negative_length_is_rejected() {
    let err = decode_message(&alive_frame(-1, b"")).expect_err("decode should fail");
    assert!(matches!(err, CodecError::InvalidLength(-1)));
}

#[test]
fn alive_truncated_device_id_is_an_error() {
    let err = decode_message(&alive_frame(8, b"dev")).expect_err("decode should fail");
    assert!(matches!(err, CodecError::Truncated { .. }));
}

// =============================================================================
// ERROR / DISPATCH
// =============================================================================

#[test]
fn error_payload_passes_through_verbatim() {
    let message = decode_message(&[TAG_ERROR, b'b', b'a', b'd']).expect("decode");
    assert_eq!(
        message,
        Message::Error {
            payload: b"bad".to_vec()
        }
    );
}

#[test]
fn error_with_empty_payload_decodes() {
    let message = decode_message(&[TAG_ERROR]).expect("decode");
    assert_eq!(message, Message::Error { payload: Vec::new() });
}

#[test]
fn empty_input_is_truncated() {
    let err = decode_message(&[]).expect_err("decode should fail");
    assert!(matches!(
        err,
        CodecError::Truncated {
            expected: 1,
            actual: 0
        }
    ));
}

#[test]
fn unknown_tag_is_rejected_with_raw_value() {
    let err = decode_message(&[0x7F, 0x00, 0x01]).expect_err("decode should fail");
    assert!(matches!(err, CodecError::UnknownTag(0x7F)));
}

#[test]
fn handshake_tag_is_not_a_server_message() {
    // 0x01 is client→server only; inbound it is unknown.
    let err = decode_message(&[TAG_HANDSHAKE, 0x03, b'a', b'b', b'c']).expect_err("decode should fail");
    assert!(matches!(err, CodecError::UnknownTag(TAG_HANDSHAKE)));
}
