use tracing::{debug, info};
use uuid::Uuid;

use crate::codec::{Message, WireFormat};
use crate::config::ProducerSettings;
use crate::queue::publisher::{Enqueue, PublishOptions};
use crate::utils::error::Result;

/// Publishes fabricated messages in batches until the configured total is
/// reached, pausing between batches.
pub struct LoadGenerator<P> {
    publisher: P,
    settings: ProducerSettings,
}

impl<P: Enqueue> LoadGenerator<P> {
    pub fn new(publisher: P, settings: ProducerSettings) -> Self {
        Self {
            publisher,
            settings,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let mut remaining = self.settings.message_count;
        while remaining > 0 {
            let batch = remaining.min(self.settings.batch_size);
            for index in 0..batch {
                let format = if index % 2 == 0 {
                    WireFormat::Json
                } else {
                    WireFormat::Protobuf
                };
                self.publisher
                    .enqueue(&fabricate(), format, PublishOptions::default())
                    .await?;
            }
            remaining -= batch;
            debug!(batch, remaining, "sent message batch");

            if remaining > 0 {
                tokio::time::sleep(self.settings.batch_delay()).await;
            }
        }
        info!(total = self.settings.message_count, "load generation complete");
        Ok(())
    }

    pub fn into_publisher(self) -> P {
        self.publisher
    }
}

/// A fresh message with a UUID body and a now-timestamp. Bodies that happen
/// to start with a digit exercise the whole priority range downstream.
pub fn fabricate() -> Message {
    Message::new(Uuid::new_v4().to_string())
}
