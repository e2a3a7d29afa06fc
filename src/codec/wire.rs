//! Protobuf representation of the work-item message.
//!
//! The schema is small enough that the messages are written out with prost
//! derives instead of generated from a `.proto` file. Conversions to and from
//! the domain [`Message`](super::Message) live here; a wire message missing
//! its header, timestamp, or payload does not convert.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

use crate::utils::error::CodecError;

use super::message;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Message {
    #[prost(message, optional, tag = "1")]
    pub header: Option<Header>,
    #[prost(message, optional, tag = "2")]
    pub payload: Option<Payload>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Payload {
    #[prost(string, tag = "1")]
    pub body: String,
}

impl From<&message::Message> for Message {
    fn from(message: &message::Message) -> Self {
        let timestamp = message.header.timestamp;
        Self {
            header: Some(Header {
                timestamp: Some(Timestamp {
                    seconds: timestamp.timestamp(),
                    nanos: timestamp.timestamp_subsec_nanos() as i32,
                }),
            }),
            payload: Some(Payload {
                body: message.payload.body.clone(),
            }),
        }
    }
}

impl TryFrom<Message> for message::Message {
    type Error = CodecError;

    fn try_from(wire: Message) -> Result<Self, Self::Error> {
        let header = wire.header.ok_or(CodecError::MissingField("header"))?;
        let payload = wire.payload.ok_or(CodecError::MissingField("payload"))?;
        let timestamp = header
            .timestamp
            .ok_or(CodecError::MissingField("header.timestamp"))?;

        let nanos =
            u32::try_from(timestamp.nanos).map_err(|_| CodecError::TimestampOutOfRange)?;
        let timestamp: DateTime<Utc> = DateTime::from_timestamp(timestamp.seconds, nanos)
            .ok_or(CodecError::TimestampOutOfRange)?;

        Ok(Self {
            header: message::Header { timestamp },
            payload: message::Payload { body: payload.body },
        })
    }
}
