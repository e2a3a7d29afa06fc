//! Downstream consumer: drains the prioritized queue and forwards each
//! decoded message into the configured sink.

use priorelay::config::load_config;
use priorelay::queue::QueueFactory;
use priorelay::sink::{Forwarder, JsonLogSink};
use priorelay::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("debug");

    let config = load_config().expect("Failed to load configuration");

    let handle = QueueFactory::new(&config.relay.prioritized_queue, config.amqp.clone())
        .create(true)
        .await
        .expect("Failed to provision prioritized queue");

    let mut forwarder = Forwarder::new(handle, JsonLogSink);

    tokio::select! {
        result = forwarder.run() => {
            if let Err(e) = result {
                error!("Forwarder exited unexpectedly: {e}");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    let (handle, _sink) = forwarder.into_parts();
    if let Err(e) = handle.close().await {
        error!("Failed to close consumer channel: {e}");
    }
}
