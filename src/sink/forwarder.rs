use futures_util::StreamExt;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions};
use lapin::types::FieldTable;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::codec::{self, Envelope};
use crate::queue::channel::QueueHandle;
use crate::utils::error::Result;

use super::MessageSink;

/// Consumes the prioritized queue and pushes each decoded message into the
/// sink, acknowledging only after the sink accepts it.
pub struct Forwarder<S> {
    consumer: QueueHandle,
    sink: S,
}

impl<S: MessageSink> Forwarder<S> {
    pub fn new(consumer: QueueHandle, sink: S) -> Self {
        Self { consumer, sink }
    }

    pub async fn run(&mut self) -> Result<()> {
        let consumer_tag = format!("priorelay-sink-{}", Uuid::new_v4());
        let mut consumer = self
            .consumer
            .channel()
            .basic_consume(
                self.consumer.queue_name(),
                &consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        while let Some(delivery) = consumer.next().await {
            let delivery = delivery?;
            debug!(
                delivery_tag = delivery.delivery_tag,
                priority = delivery.properties.priority().unwrap_or(0),
                "picked up message"
            );

            // Same decode policy as the relay: malformed deliveries leave
            // the queue instead of redelivering forever.
            let message = match codec::decode(&Envelope::from_delivery(&delivery)) {
                Ok(message) => message,
                Err(err) => {
                    warn!(%err, "discarding malformed envelope");
                    delivery
                        .acker
                        .nack(BasicNackOptions {
                            requeue: false,
                            ..BasicNackOptions::default()
                        })
                        .await?;
                    continue;
                }
            };

            match self.sink.forward(&message).await {
                Ok(()) => delivery.acker.ack(BasicAckOptions::default()).await?,
                Err(err) => {
                    error!(%err, "sink refused message, leaving it for redelivery");
                    delivery
                        .acker
                        .nack(BasicNackOptions {
                            requeue: true,
                            ..BasicNackOptions::default()
                        })
                        .await?;
                }
            }

            debug!(delivery_tag = delivery.delivery_tag, "finished message");
        }
        Ok(())
    }

    pub fn into_parts(self) -> (QueueHandle, S) {
        (self.consumer, self.sink)
    }
}
