use async_trait::async_trait;
use lapin::BasicProperties;
use lapin::options::BasicPublishOptions;
use lapin::types::FieldTable;
use tracing::debug;

use crate::codec::{self, Envelope, Message, WireFormat};
use crate::utils::error::Result;

use super::channel::{MAX_PRIORITY, QueueHandle};

/// Publish-side wire options: the envelope fields only the broker reads.
///
/// Priority outside `[0, MAX_PRIORITY]` is a caller error.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub persistent: bool,
    pub priority: u8,
    pub headers: Option<FieldTable>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            persistent: true,
            priority: 0,
            headers: None,
        }
    }
}

impl PublishOptions {
    pub fn with_priority(priority: u8) -> Self {
        Self {
            priority,
            ..Self::default()
        }
    }
}

/// The publishing seam. The relay and load generator are generic over this
/// so tests can substitute a recording or failing publisher.
#[async_trait]
pub trait Enqueue {
    async fn enqueue(
        &self,
        message: &Message,
        format: WireFormat,
        options: PublishOptions,
    ) -> Result<()>;
}

/// Publishes messages onto one provisioned queue via its default routing,
/// with the broker required to route each publish somewhere.
pub struct QueuePublisher {
    handle: QueueHandle,
}

impl QueuePublisher {
    pub fn new(handle: QueueHandle) -> Self {
        Self { handle }
    }

    pub fn queue_name(&self) -> &str {
        self.handle.queue_name()
    }

    pub async fn close(self) -> Result<()> {
        self.handle.close().await
    }
}

#[async_trait]
impl Enqueue for QueuePublisher {
    async fn enqueue(
        &self,
        message: &Message,
        format: WireFormat,
        options: PublishOptions,
    ) -> Result<()> {
        debug_assert!(options.priority <= MAX_PRIORITY);

        let envelope = codec::encode(message, format)?;
        let confirm = self
            .handle
            .channel()
            .basic_publish(
                "",
                self.handle.queue_name(),
                BasicPublishOptions {
                    mandatory: true,
                    ..BasicPublishOptions::default()
                },
                &envelope.body,
                properties(&envelope, &options),
            )
            .await?;
        confirm.await?;

        debug!(
            queue = %self.handle.queue_name(),
            priority = options.priority,
            "published message"
        );
        Ok(())
    }
}

/// Builds the AMQP properties for an outbound publish: content negotiation
/// tags from the envelope, priority byte, persistence, optional headers.
pub fn properties(envelope: &Envelope, options: &PublishOptions) -> BasicProperties {
    let mut properties = BasicProperties::default().with_priority(options.priority);
    if options.persistent {
        properties = properties.with_delivery_mode(2);
    }
    if let Some(content_type) = &envelope.content_type {
        properties = properties.with_content_type(content_type.as_str().into());
    }
    if let Some(content_encoding) = &envelope.content_encoding {
        properties = properties.with_content_encoding(content_encoding.as_str().into());
    }
    if let Some(headers) = &options.headers {
        properties = properties.with_headers(headers.clone());
    }
    properties
}
