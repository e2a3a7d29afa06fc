use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::codec::{Message, WireFormat};
use crate::config::ProducerSettings;
use crate::queue::publisher::{Enqueue, PublishOptions};
use crate::utils::error::Result;

use super::{LoadGenerator, fabricate};

struct CountingPublisher {
    formats: Mutex<Vec<WireFormat>>,
}

#[async_trait]
impl Enqueue for CountingPublisher {
    async fn enqueue(
        &self,
        _message: &Message,
        format: WireFormat,
        _options: PublishOptions,
    ) -> Result<()> {
        self.formats.lock().unwrap().push(format);
        Ok(())
    }
}

#[test]
fn test_fabricate_produces_uuid_bodies() {
    let message = fabricate();
    assert!(Uuid::parse_str(&message.payload.body).is_ok());

    // Bodies differ between calls.
    assert_ne!(message.payload.body, fabricate().payload.body);
}

#[tokio::test(start_paused = true)]
async fn test_run_sends_configured_total_in_batches() {
    let publisher = CountingPublisher {
        formats: Mutex::new(Vec::new()),
    };
    let settings = ProducerSettings {
        batch_size: 4,
        batch_delay_secs: 30,
        message_count: 10,
    };

    let generator = LoadGenerator::new(publisher, settings);
    generator.run().await.unwrap();

    let formats = generator.into_publisher().formats.into_inner().unwrap();
    assert_eq!(formats.len(), 10);
    // Wire forms alternate within each batch.
    assert_eq!(formats[0], WireFormat::Json);
    assert_eq!(formats[1], WireFormat::Protobuf);
    assert_eq!(formats[2], WireFormat::Json);
}
