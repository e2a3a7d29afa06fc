//! The `queue` module is the broker-facing layer: connection acquisition
//! with retry, queue provisioning, and publishing.
//!
//! Each provisioned queue is represented by a [`QueueHandle`] that owns its
//! own connection and channel; handles are never shared between components.
//! Provisioning declares the queue durable with an optional bounded-priority
//! extension and caps the channel at one unacknowledged delivery in flight.

pub mod channel;
pub mod connection;
pub mod publisher;

pub use channel::{MAX_PRIORITY, QueueFactory, QueueHandle};
pub use connection::RetryPolicy;
pub use publisher::{Enqueue, PublishOptions, QueuePublisher};
