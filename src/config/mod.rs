mod settings;

use config::{Config, ConfigError, Environment, File};

use crate::config::settings::PartialSettings;

pub use settings::{AmqpSettings, ProducerSettings, RelaySettings, Settings};

#[cfg(test)]
mod tests;

const DEFAULT_VHOST: &str = "/";
const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Loads the configuration from the default file and environment variables
/// (`AMQP_USERNAME`, `AMQP_PASSWORD`, `AMQP_HOST`, ...)
/// Merges the configuration with default values
/// Returns a `Settings` struct; a missing or blank broker credential is an
/// immediate error, there is no default to fall back to
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let amqp = partial.amqp.unwrap_or_default();
    let relay_default = RelaySettings::default();
    let producer_default = ProducerSettings::default();

    Ok(Settings {
        amqp: AmqpSettings {
            username: required(amqp.username, "AMQP_USERNAME")?,
            password: required(amqp.password, "AMQP_PASSWORD")?,
            host: required(amqp.host, "AMQP_HOST")?,
            vhost: amqp.vhost.unwrap_or_else(|| DEFAULT_VHOST.to_string()),
            retry_delay_secs: amqp.retry_delay_secs.unwrap_or(DEFAULT_RETRY_DELAY_SECS),
        },
        relay: RelaySettings {
            work_queue: partial
                .relay
                .as_ref()
                .and_then(|r| r.work_queue.clone())
                .unwrap_or(relay_default.work_queue),
            prioritized_queue: partial
                .relay
                .as_ref()
                .and_then(|r| r.prioritized_queue.clone())
                .unwrap_or(relay_default.prioritized_queue),
        },
        producer: ProducerSettings {
            batch_size: partial
                .producer
                .as_ref()
                .and_then(|p| p.batch_size)
                .unwrap_or(producer_default.batch_size),
            batch_delay_secs: partial
                .producer
                .as_ref()
                .and_then(|p| p.batch_delay_secs)
                .unwrap_or(producer_default.batch_delay_secs),
            message_count: partial
                .producer
                .as_ref()
                .and_then(|p| p.message_count)
                .unwrap_or(producer_default.message_count),
        },
    })
}

fn required(value: Option<String>, name: &str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Message(format!("{name} must be defined"))),
    }
}
