//! The `error` module defines the error types used within the `priorelay`
//! application.
//!
//! `CodecError` covers every way a wire envelope can fail to decode; the
//! relay treats any of its variants as a malformed envelope. `Error` is the
//! crate-level type that fallible operations propagate.

use thiserror::Error;

/// A wire envelope that cannot be turned into a [`Message`](crate::codec::Message).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("message missing content type")]
    MissingContentType,

    #[error("unexpected content type {0:?}")]
    UnexpectedContentType(String),

    #[error("unsupported content encoding {0:?}")]
    UnsupportedContentEncoding(String),

    #[error("message body is not valid utf-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    #[error("invalid json message: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid protobuf message: {0}")]
    InvalidProtobuf(#[from] prost::DecodeError),

    #[error("message missing required field {0:?}")]
    MissingField(&'static str),

    #[error("message timestamp out of range")]
    TimestampOutOfRange,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("broker error: {0}")]
    Broker(#[from] lapin::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
