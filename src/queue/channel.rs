use lapin::options::{BasicQosOptions, QueueDeclareOptions};
use lapin::types::{AMQPValue, FieldTable};
use lapin::{Channel, Connection};
use tracing::{debug, info};

use crate::config::AmqpSettings;
use crate::utils::error::Result;

use super::connection::{self, RetryPolicy};

/// Highest priority level a provisioned priority queue accepts.
pub const MAX_PRIORITY: u8 = 10;

/// One provisioned queue: a connection and a channel bound to a named queue,
/// exclusively owned by whichever component created it.
pub struct QueueHandle {
    connection: Connection,
    channel: Channel,
    queue_name: String,
}

impl QueueHandle {
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Shuts the channel, then the connection.
    pub async fn close(self) -> Result<()> {
        self.channel.close(200, "shutting down").await?;
        self.connection.close(200, "shutting down").await?;
        Ok(())
    }
}

/// Declares a named durable queue and hands out [`QueueHandle`]s for it.
pub struct QueueFactory {
    queue_name: String,
    settings: AmqpSettings,
}

impl QueueFactory {
    pub fn new(queue_name: &str, settings: AmqpSettings) -> Self {
        Self {
            queue_name: queue_name.to_string(),
            settings,
        }
    }

    /// Connects (retrying until the broker is reachable), declares the queue
    /// durable/non-exclusive/non-auto-delete, and caps the channel at one
    /// unacknowledged delivery. With `priority` set, the declaration carries
    /// the bounded-priority extension.
    pub async fn create(&self, priority: bool) -> Result<QueueHandle> {
        let policy = RetryPolicy::forever(self.settings.retry_delay());
        let connection = connection::connect(&self.settings, &policy).await?;
        let channel = connection.create_channel().await?;

        let options = QueueDeclareOptions {
            durable: true,
            exclusive: false,
            auto_delete: false,
            ..QueueDeclareOptions::default()
        };
        let queue = channel
            .queue_declare(&self.queue_name, options, declare_arguments(priority))
            .await?;
        info!(
            queue = %self.queue_name,
            messages = queue.message_count(),
            consumers = queue.consumer_count(),
            priority,
            "declared queue"
        );

        // At most one unacknowledged delivery in flight per channel.
        channel.basic_qos(1, BasicQosOptions { global: false }).await?;

        debug!(queue = %self.queue_name, "created channel");
        Ok(QueueHandle {
            connection,
            channel,
            queue_name: self.queue_name.clone(),
        })
    }
}

/// Declare arguments for the queue; the priority variant bounds the levels
/// the broker will honor at [`MAX_PRIORITY`].
pub fn declare_arguments(priority: bool) -> FieldTable {
    let mut arguments = FieldTable::default();
    if priority {
        arguments.insert(
            "x-max-priority".into(),
            AMQPValue::LongInt(MAX_PRIORITY as i32),
        );
    }
    arguments
}
