use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work-item message as it moves through the relay.
///
/// Messages are immutable once constructed and round-trip losslessly through
/// both wire forms, including nanosecond timestamp precision.
///
/// # Fields
///
/// - `header` - Delivery metadata, currently just the creation timestamp.
/// - `payload` - The work item itself, an opaque string body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub header: Header,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub body: String,
}

impl Message {
    /// Builds a message stamped with the current time.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            header: Header {
                timestamp: Utc::now(),
            },
            payload: Payload { body: body.into() },
        }
    }
}
