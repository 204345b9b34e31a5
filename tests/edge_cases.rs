#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for the frame codec
//! Tests boundary conditions, hostile headers, and error classification

use packet_wire::config::{HEADER_SIZE, MAX_FRAME_SIZE};
use packet_wire::core::frame::{decode, decode_with_limit, encode, FrameHeader};
use packet_wire::core::message_type::MessageType;
use packet_wire::core::packet::Packet;
use packet_wire::error::{EncodingError, ProtocolError};

fn header(magic: i32, code: &[u8; 2], source: i32, destination: i32, length: i32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE);
    bytes.extend_from_slice(&magic.to_be_bytes());
    bytes.extend_from_slice(code);
    bytes.extend_from_slice(&source.to_be_bytes());
    bytes.extend_from_slice(&destination.to_be_bytes());
    bytes.extend_from_slice(&length.to_be_bytes());
    bytes
}

// ============================================================================
// PACKET CODEC EDGE CASES
// ============================================================================

#[test]
fn test_packet_empty_message() {
    let packet = Packet::new(0, MessageType::Logout, 1, 2, "").expect("empty message is valid");
    let bytes = encode(&packet).expect("encode");
    assert_eq!(bytes.len(), HEADER_SIZE);

    let (decoded, used) = decode(&bytes).expect("Should decode empty message");
    assert_eq!(decoded.message_length(), 0);
    assert_eq!(decoded.message(), "");
    assert_eq!(used, HEADER_SIZE);
}

#[test]
fn test_packet_at_max_frame_size() {
    let message = "a".repeat(MAX_FRAME_SIZE - HEADER_SIZE);
    let packet = Packet::new(1, MessageType::Data, 1, 2, message).expect("valid");
    let bytes = encode(&packet).expect("encode");
    assert_eq!(bytes.len(), MAX_FRAME_SIZE);

    let (decoded, used) = decode(&bytes).expect("Should decode a frame at the limit");
    assert_eq!(used, MAX_FRAME_SIZE);
    assert_eq!(
        decoded.message_length() as usize,
        MAX_FRAME_SIZE - HEADER_SIZE
    );
}

#[test]
fn test_oversized_length_rejected_before_payload_arrives() {
    // Only the header is present; the claimed size alone must be rejected
    let bytes = header(0, b"DA", 1, 2, 20_000_000);

    match decode(&bytes) {
        Err(ProtocolError::MalformedLength {
            length: 20_000_000,
            max_frame_size: MAX_FRAME_SIZE,
        }) => {}
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_negative_length_rejected() {
    let mut bytes = header(0, b"DA", 1, 2, -1);
    bytes.extend_from_slice(&[0xAA; 8]);

    let result = decode(&bytes);
    assert!(
        matches!(
            result,
            Err(ProtocolError::MalformedLength { length: -1, .. })
        ),
        "Should reject negative length"
    );
}

#[test]
fn test_max_i32_length_rejected() {
    let bytes = header(0, b"LI", 1, 2, i32::MAX);
    let result = decode_with_limit(&bytes, usize::MAX);
    // 18 + i32::MAX fits in usize, so only a truncated payload is left to report
    assert!(matches!(
        result,
        Err(ProtocolError::TruncatedFrame { available: 18, .. })
    ));

    let result = decode(&bytes);
    assert!(matches!(
        result,
        Err(ProtocolError::MalformedLength { length: i32::MAX, .. })
    ));
}

#[test]
fn test_unknown_type_code() {
    let mut bytes = header(0, b"XX", 1, 2, 3);
    bytes.extend_from_slice(b"abc");

    let result = decode(&bytes);
    assert!(
        matches!(result, Err(ProtocolError::UnknownMessageType([b'X', b'X']))),
        "Should reject unknown message type"
    );
    assert!(result.unwrap_err().is_fatal());
}

#[test]
fn test_type_code_is_case_sensitive() {
    let bytes = header(0, b"da", 1, 2, 0);
    assert!(matches!(
        decode(&bytes),
        Err(ProtocolError::UnknownMessageType(_))
    ));
}

#[test]
fn test_unknown_type_reported_before_length() {
    // Both the type and the length are bad; the type is checked first
    let bytes = header(0, b"\0\0", 1, 2, -5);
    assert!(matches!(
        decode(&bytes),
        Err(ProtocolError::UnknownMessageType([0, 0]))
    ));
}

#[test]
fn test_truncated_header() {
    let bytes = vec![0x00, 0x00, 0x00, 0x00, b'D'];
    let result = decode(&bytes);
    match result {
        Err(ProtocolError::TruncatedFrame {
            needed: 18,
            available: 5,
        }) => {}
        other => panic!("Unexpected: {other:?}"),
    }
}

#[test]
fn test_empty_buffer() {
    let result = decode(&[]);
    assert!(
        matches!(
            result,
            Err(ProtocolError::TruncatedFrame {
                needed: 18,
                available: 0
            })
        ),
        "Should report truncation on empty buffer"
    );
    assert!(result.unwrap_err().is_incomplete());
}

#[test]
fn test_truncated_payload() {
    let mut bytes = header(7, b"DA", 1, 2, 10);
    bytes.extend_from_slice(b"only6b");

    match decode(&bytes) {
        Err(ProtocolError::TruncatedFrame {
            needed: 28,
            available: 24,
        }) => {}
        other => panic!("Unexpected: {other:?}"),
    }
}

#[test]
fn test_frame_header_parse_without_payload() {
    let bytes = header(-9, b"LO", 3, 4, 100);
    let parsed = FrameHeader::parse(&bytes, MAX_FRAME_SIZE).expect("header is complete");
    assert_eq!(parsed.magic_bytes(), -9);
    assert_eq!(parsed.message_type(), MessageType::Logout);
    assert_eq!(parsed.message_source_id(), 3);
    assert_eq!(parsed.message_destination_id(), 4);
    assert_eq!(parsed.message_length(), 100);
    assert_eq!(parsed.payload_len(), 100);
    assert_eq!(parsed.frame_len(), 118);
}

#[test]
fn test_high_latin1_bytes_decode_to_chars() {
    let mut bytes = header(0, b"DA", 1, 2, 3);
    bytes.extend_from_slice(&[0xE9, 0x00, 0xFF]);

    let (packet, _) = decode(&bytes).expect("every byte is valid text");
    assert_eq!(packet.message(), "\u{e9}\u{0}\u{ff}");
    assert_eq!(encode(&packet).expect("re-encode"), bytes);
}

// ============================================================================
// ENCODE PRECONDITIONS
// ============================================================================

#[test]
fn test_encode_rejects_declared_length_mismatch() {
    let packet = Packet::with_declared_length(0, MessageType::Data, 1, 2, 2, "three");
    let result = encode(&packet);
    assert!(matches!(
        result,
        Err(ProtocolError::Encoding(EncodingError::LengthMismatch {
            declared: 2,
            actual: 5
        }))
    ));
    let err = result.unwrap_err();
    assert!(!err.is_fatal());
    assert!(!err.is_incomplete());
}

#[test]
fn test_encode_rejects_unmappable_message() {
    let packet = Packet::with_declared_length(0, MessageType::Data, 1, 2, 1, "\u{2603}");
    assert!(matches!(
        encode(&packet),
        Err(ProtocolError::Encoding(
            EncodingError::UnmappableCharacter { .. }
        ))
    ));
}

#[test]
fn test_utf8_multibyte_latin1_is_one_byte_on_wire() {
    let packet = Packet::new(0, MessageType::Data, 1, 2, "\u{fc}ber").expect("valid");
    assert_eq!("\u{fc}ber".len(), 5);
    assert_eq!(packet.message_length(), 4);
    assert_eq!(encode(&packet).expect("encode").len(), HEADER_SIZE + 4);
}
