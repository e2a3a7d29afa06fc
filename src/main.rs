use priorelay::config::load_config;
use priorelay::queue::{QueueFactory, QueuePublisher};
use priorelay::relay::PriorityRelay;
use priorelay::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("debug");

    let config = load_config().expect("Failed to load configuration");

    let publisher_handle = QueueFactory::new(&config.relay.prioritized_queue, config.amqp.clone())
        .create(true)
        .await
        .expect("Failed to provision prioritized queue");
    let consumer_handle = QueueFactory::new(&config.relay.work_queue, config.amqp.clone())
        .create(false)
        .await
        .expect("Failed to provision work queue");

    let mut relay = PriorityRelay::new(consumer_handle, QueuePublisher::new(publisher_handle));

    tokio::select! {
        result = relay.run() => {
            if let Err(e) = result {
                error!("Relay exited unexpectedly: {e}");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    // Close without draining; an in-flight delivery redelivers on restart.
    let (consumer_handle, publisher) = relay.into_parts();
    if let Err(e) = consumer_handle.close().await {
        error!("Failed to close consumer channel: {e}");
    }
    if let Err(e) = publisher.close().await {
        error!("Failed to close publisher channel: {e}");
    }
}
