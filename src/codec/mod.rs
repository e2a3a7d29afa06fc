//! The `codec` module defines the work-item message and its two wire forms.
//!
//! A [`Message`] travels over the broker either as JSON text
//! (`application/json`, UTF-8) or as protobuf bytes
//! (`application/protobuf; proto=priorelay.Message`). The content-type tag on
//! the wire envelope selects the form; an envelope without a recognizable
//! content type is malformed and never decodes.

pub mod envelope;
pub mod message;
pub mod wire;

pub use envelope::{Envelope, WireFormat, decode, encode};
pub use message::{Header, Message, Payload};

#[cfg(test)]
mod tests;
