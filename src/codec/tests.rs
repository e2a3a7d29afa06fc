use chrono::{TimeZone, Utc};
use prost::Message as _;

use crate::utils::error::CodecError;

use super::envelope::{CONTENT_TYPE_JSON, CONTENT_TYPE_PROTOBUF};
use super::{Envelope, Header, Message, Payload, WireFormat, decode, encode, wire};

fn sample_message() -> Message {
    Message {
        header: Header {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
                + chrono::Duration::nanoseconds(123_456_789),
        },
        payload: Payload {
            body: "9f2a6c1e".to_string(),
        },
    }
}

#[test]
fn test_json_round_trip() {
    let message = sample_message();
    let envelope = encode(&message, WireFormat::Json).unwrap();
    assert_eq!(envelope.content_type.as_deref(), Some(CONTENT_TYPE_JSON));
    assert_eq!(envelope.content_encoding.as_deref(), Some("utf-8"));

    let decoded = decode(&envelope).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_protobuf_round_trip() {
    let message = sample_message();
    let envelope = encode(&message, WireFormat::Protobuf).unwrap();
    let content_type = envelope.content_type.as_deref().unwrap();
    assert!(content_type.starts_with(CONTENT_TYPE_PROTOBUF));
    assert!(envelope.content_encoding.is_none());

    let decoded = decode(&envelope).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_decode_missing_content_type() {
    let envelope = Envelope {
        content_type: None,
        content_encoding: None,
        body: b"{}".to_vec(),
    };
    assert!(matches!(
        decode(&envelope),
        Err(CodecError::MissingContentType)
    ));
}

#[test]
fn test_decode_blank_content_type() {
    let envelope = Envelope {
        content_type: Some("   ".to_string()),
        content_encoding: None,
        body: b"{}".to_vec(),
    };
    assert!(matches!(
        decode(&envelope),
        Err(CodecError::MissingContentType)
    ));
}

#[test]
fn test_decode_unexpected_content_type() {
    let envelope = Envelope {
        content_type: Some("text/plain".to_string()),
        content_encoding: None,
        body: b"hello".to_vec(),
    };
    assert!(matches!(
        decode(&envelope),
        Err(CodecError::UnexpectedContentType(_))
    ));
}

#[test]
fn test_decode_json_defaults_to_utf8() {
    let mut envelope = encode(&sample_message(), WireFormat::Json).unwrap();
    envelope.content_encoding = None;
    assert!(decode(&envelope).is_ok());
}

#[test]
fn test_decode_json_rejects_unknown_encoding() {
    let mut envelope = encode(&sample_message(), WireFormat::Json).unwrap();
    envelope.content_encoding = Some("latin-1".to_string());
    assert!(matches!(
        decode(&envelope),
        Err(CodecError::UnsupportedContentEncoding(_))
    ));
}

#[test]
fn test_decode_json_rejects_invalid_utf8() {
    let envelope = Envelope {
        content_type: Some(CONTENT_TYPE_JSON.to_string()),
        content_encoding: Some("utf-8".to_string()),
        body: vec![0xff, 0xfe, 0xfd],
    };
    assert!(matches!(decode(&envelope), Err(CodecError::InvalidText(_))));
}

#[test]
fn test_decode_json_rejects_unparseable_body() {
    let envelope = Envelope {
        content_type: Some(CONTENT_TYPE_JSON.to_string()),
        content_encoding: None,
        body: b"{\"header\":42}".to_vec(),
    };
    assert!(matches!(decode(&envelope), Err(CodecError::InvalidJson(_))));
}

#[test]
fn test_decode_protobuf_rejects_garbage() {
    let envelope = Envelope {
        content_type: Some(CONTENT_TYPE_PROTOBUF.to_string()),
        content_encoding: None,
        body: vec![0xde, 0xad, 0xbe, 0xef],
    };
    assert!(matches!(
        decode(&envelope),
        Err(CodecError::InvalidProtobuf(_))
    ));
}

#[test]
fn test_decode_protobuf_requires_payload() {
    let wire = wire::Message {
        header: Some(wire::Header {
            timestamp: Some(prost_types::Timestamp {
                seconds: 1,
                nanos: 0,
            }),
        }),
        payload: None,
    };
    let envelope = Envelope {
        content_type: Some(CONTENT_TYPE_PROTOBUF.to_string()),
        content_encoding: None,
        body: wire.encode_to_vec(),
    };
    assert!(matches!(
        decode(&envelope),
        Err(CodecError::MissingField("payload"))
    ));
}

#[test]
fn test_decode_protobuf_accepts_schema_suffix() {
    let message = sample_message();
    let mut envelope = encode(&message, WireFormat::Protobuf).unwrap();
    envelope.content_type = Some("application/protobuf; proto=some.other.Name".to_string());
    assert_eq!(decode(&envelope).unwrap(), message);
}

#[test]
fn test_json_field_layout() {
    let envelope = encode(&sample_message(), WireFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&envelope.body).unwrap();
    assert!(value["header"]["timestamp"].is_string());
    assert_eq!(value["payload"]["body"], "9f2a6c1e");
}
