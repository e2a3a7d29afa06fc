//! The `sink` module forwards decoded messages from the prioritized queue to
//! a downstream transport.
//!
//! The transport itself is external; [`MessageSink`] pins down the only part
//! of it this crate cares about. The shipped [`JsonLogSink`] emits each
//! message as a JSON line through the logging layer.

pub mod forwarder;

pub use forwarder::Forwarder;

use async_trait::async_trait;
use tracing::info;

use crate::codec::Message;
use crate::utils::error::{CodecError, Result};

/// Where decoded messages go after the relay hop.
#[async_trait]
pub trait MessageSink {
    async fn forward(&self, message: &Message) -> Result<()>;
}

/// Emits each forwarded message as a JSON line at info level.
pub struct JsonLogSink;

#[async_trait]
impl MessageSink for JsonLogSink {
    async fn forward(&self, message: &Message) -> Result<()> {
        let json = serde_json::to_string(message).map_err(CodecError::from)?;
        info!(%json, "forwarded message");
        Ok(())
    }
}
