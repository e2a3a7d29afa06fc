//! Synthetic load generator: publishes batches of fabricated work items to
//! the work queue until the configured total is reached.

use priorelay::config::load_config;
use priorelay::producer::LoadGenerator;
use priorelay::queue::{QueueFactory, QueuePublisher};
use priorelay::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("debug");

    let config = load_config().expect("Failed to load configuration");

    let handle = QueueFactory::new(&config.relay.work_queue, config.amqp.clone())
        .create(false)
        .await
        .expect("Failed to provision work queue");
    let generator = LoadGenerator::new(QueuePublisher::new(handle), config.producer.clone());

    tokio::select! {
        result = generator.run() => match result {
            Ok(()) => info!("All messages sent."),
            Err(e) => error!("Load generation failed: {e}"),
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    if let Err(e) = generator.into_publisher().close().await {
        error!("Failed to close publisher channel: {e}");
    }
}
