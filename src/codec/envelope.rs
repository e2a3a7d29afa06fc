use lapin::message::Delivery;
use prost::Message as _;

use crate::utils::error::CodecError;

use super::message::Message;
use super::wire;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_PROTOBUF: &str = "application/protobuf";

const DEFAULT_ENCODING: &str = "utf-8";
const PROTOBUF_SCHEMA: &str = "priorelay.Message";

/// The codec-facing slice of a wire envelope: the content negotiation tags
/// and the raw body. Priority, persistence, and headers belong to the
/// publish call, not to the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub content_type: Option<String>,
    pub content_encoding: Option<String>,
    pub body: Vec<u8>,
}

impl Envelope {
    /// Extracts the envelope from an inbound broker delivery.
    pub fn from_delivery(delivery: &Delivery) -> Self {
        Self {
            content_type: delivery
                .properties
                .content_type()
                .as_ref()
                .map(|s| s.as_str().to_string()),
            content_encoding: delivery
                .properties
                .content_encoding()
                .as_ref()
                .map(|s| s.as_str().to_string()),
            body: delivery.data.clone(),
        }
    }
}

/// Which wire form [`encode`] should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Json,
    Protobuf,
}

/// Decodes a wire envelope into a [`Message`], dispatching on its content
/// type.
///
/// An envelope with a missing, blank, or unrecognized content type is
/// malformed, as is one whose body fails to parse. The JSON form honors a
/// `content_encoding` of `utf-8` (the default when absent); any other
/// declared encoding is rejected.
pub fn decode(envelope: &Envelope) -> Result<Message, CodecError> {
    let content_type = match envelope.content_type.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(CodecError::MissingContentType),
    };

    if content_type == CONTENT_TYPE_JSON {
        let encoding = envelope.content_encoding.as_deref().unwrap_or(DEFAULT_ENCODING);
        if !encoding.eq_ignore_ascii_case("utf-8") && !encoding.eq_ignore_ascii_case("utf8") {
            return Err(CodecError::UnsupportedContentEncoding(encoding.to_string()));
        }
        let text = String::from_utf8(envelope.body.clone())?;
        Ok(serde_json::from_str(&text)?)
    } else if content_type.starts_with(CONTENT_TYPE_PROTOBUF) {
        let wire = wire::Message::decode(envelope.body.as_slice())?;
        Message::try_from(wire)
    } else {
        Err(CodecError::UnexpectedContentType(content_type.to_string()))
    }
}

/// Encodes a [`Message`] into the requested wire form.
pub fn encode(message: &Message, format: WireFormat) -> Result<Envelope, CodecError> {
    match format {
        WireFormat::Json => Ok(Envelope {
            content_type: Some(CONTENT_TYPE_JSON.to_string()),
            content_encoding: Some(DEFAULT_ENCODING.to_string()),
            body: serde_json::to_vec(message)?,
        }),
        WireFormat::Protobuf => Ok(Envelope {
            content_type: Some(format!("{CONTENT_TYPE_PROTOBUF}; proto={PROTOBUF_SCHEMA}")),
            content_encoding: None,
            body: wire::Message::from(message).encode_to_vec(),
        }),
    }
}
