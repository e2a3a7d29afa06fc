use std::future::Future;
use std::time::Duration;

use lapin::uri::{AMQPAuthority, AMQPScheme, AMQPUri, AMQPUserInfo};
use lapin::{Connection, ConnectionProperties};
use tracing::warn;

use crate::config::AmqpSettings;

const AMQP_PORT: u16 = 5672;

/// How a failing operation is retried: wait `delay` between attempts, give
/// up after `max_attempts` when set.
///
/// Production connects with [`RetryPolicy::forever`]: the broker may come
/// up after this process does, so there is deliberately no cutoff. Dropping
/// the future (select/timeout at the call site) is the only way out.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn forever(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    pub fn at_most(attempts: u32, delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: Some(attempts),
        }
    }
}

/// Awaits `operation` until it succeeds or the policy's attempts run out.
/// Every failure is logged at warn level before the delay elapses.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                if policy.max_attempts.is_some_and(|max| attempt >= max) {
                    return Err(error);
                }
                warn!(attempt, %error, "attempt failed, retrying");
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

/// Builds the broker URI from the configured connection parameters.
pub fn amqp_uri(settings: &AmqpSettings) -> AMQPUri {
    AMQPUri {
        scheme: AMQPScheme::AMQP,
        authority: AMQPAuthority {
            userinfo: AMQPUserInfo {
                username: settings.username.clone(),
                password: settings.password.clone(),
            },
            host: settings.host.clone(),
            port: AMQP_PORT,
        },
        vhost: settings.vhost.clone(),
        query: Default::default(),
    }
}

/// Acquires a broker connection, retrying per `policy`.
pub async fn connect(settings: &AmqpSettings, policy: &RetryPolicy) -> lapin::Result<Connection> {
    let uri = amqp_uri(settings);
    retry(policy, || {
        Connection::connect_uri(uri.clone(), ConnectionProperties::default())
    })
    .await
}
