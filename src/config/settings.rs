use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Covers the broker connection, the relay's queue pair, and the synthetic
/// load generator.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub amqp: AmqpSettings,
    pub relay: RelaySettings,
    pub producer: ProducerSettings,
}

/// Broker connection parameters.
///
/// Username, password, and host carry no defaults; configuration loading
/// fails without them.
#[derive(Debug, Deserialize, Clone)]
pub struct AmqpSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub vhost: String,
    pub retry_delay_secs: u64,
}

impl AmqpSettings {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

/// The queue pair the relay moves messages between.
#[derive(Debug, Deserialize, Clone)]
pub struct RelaySettings {
    pub work_queue: String,
    pub prioritized_queue: String,
}

/// Operational parameters for the synthetic load generator.
#[derive(Debug, Deserialize, Clone)]
pub struct ProducerSettings {
    pub batch_size: usize,
    pub batch_delay_secs: u64,
    pub message_count: usize,
}

impl ProducerSettings {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs(self.batch_delay_secs)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled
/// using defaults, except the required broker credentials.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub amqp: Option<PartialAmqpSettings>,
    pub relay: Option<PartialRelaySettings>,
    pub producer: Option<PartialProducerSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialAmqpSettings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub vhost: Option<String>,
    pub retry_delay_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialRelaySettings {
    pub work_queue: Option<String>,
    pub prioritized_queue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialProducerSettings {
    pub batch_size: Option<usize>,
    pub batch_delay_secs: Option<u64>,
    pub message_count: Option<usize>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            work_queue: "work_queue".to_string(),
            prioritized_queue: "prioritized_work_queue".to_string(),
        }
    }
}

impl Default for ProducerSettings {
    fn default() -> Self {
        Self {
            batch_size: 96,
            batch_delay_secs: 30,
            message_count: 500,
        }
    }
}
