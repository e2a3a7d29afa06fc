use futures_util::StreamExt;
use lapin::message::Delivery;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions};
use lapin::types::FieldTable;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::codec::{self, Envelope, WireFormat};
use crate::queue::channel::QueueHandle;
use crate::queue::publisher::{Enqueue, PublishOptions};
use crate::utils::error::Result;

use super::priority::message_priority;

/// What to do with an inbound delivery once it has been examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Republished successfully; acknowledge the source delivery.
    Ack { priority: u8 },
    /// Not republished; negatively acknowledge, optionally requeueing.
    Reject { requeue: bool },
}

/// Decides the fate of one delivery: decode, derive the priority, republish
/// through `publisher`.
///
/// A malformed envelope is rejected without requeue, so it leaves the work
/// queue (or moves to a dead-letter queue if the operator attached one)
/// instead of redelivering forever. A failed republish rejects with requeue,
/// leaving the message eligible for redelivery.
pub(crate) async fn process<P: Enqueue>(publisher: &P, envelope: &Envelope) -> Disposition {
    let message = match codec::decode(envelope) {
        Ok(message) => message,
        Err(error) => {
            warn!(%error, "discarding malformed envelope");
            return Disposition::Reject { requeue: false };
        }
    };

    let priority = message_priority(&message);

    match publisher
        .enqueue(
            &message,
            WireFormat::Json,
            PublishOptions::with_priority(priority),
        )
        .await
    {
        Ok(()) => Disposition::Ack { priority },
        Err(error) => {
            error!(%error, "republish failed, leaving message for redelivery");
            Disposition::Reject { requeue: true }
        }
    }
}

/// Relays deliveries from its consuming queue onto the prioritized queue.
///
/// The consuming channel is provisioned with prefetch 1, so at most one
/// delivery moves through the cycle at a time per relay instance; running
/// more instances against the same queues is how this scales out.
pub struct PriorityRelay<P> {
    consumer: QueueHandle,
    publisher: P,
}

impl<P: Enqueue> PriorityRelay<P> {
    pub fn new(consumer: QueueHandle, publisher: P) -> Self {
        Self {
            consumer,
            publisher,
        }
    }

    /// Consumes deliveries until the stream ends or the surrounding future
    /// is dropped. An in-flight delivery at shutdown is not drained; it
    /// simply redelivers on restart.
    pub async fn run(&mut self) -> Result<()> {
        let consumer_tag = format!("priorelay-{}", Uuid::new_v4());
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
            debug!(delivery_tag = delivery.delivery_tag, "picked up message");

            let disposition = process(&self.publisher, &Envelope::from_delivery(&delivery)).await;
            settle(&delivery, disposition).await?;

            debug!(delivery_tag = delivery.delivery_tag, "finished message");
        }
        Ok(())
    }

    /// Releases the consuming handle and the publisher for disposal.
    pub fn into_parts(self) -> (QueueHandle, P) {
        (self.consumer, self.publisher)
    }
}

async fn settle(delivery: &Delivery, disposition: Disposition) -> Result<()> {
    match disposition {
        Disposition::Ack { .. } => {
            delivery.acker.ack(BasicAckOptions::default()).await?;
        }
        Disposition::Reject { requeue } => {
            delivery
                .acker
                .nack(BasicNackOptions {
                    requeue,
                    ..BasicNackOptions::default()
                })
                .await?;
        }
    }
    Ok(())
}
