use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Domain events emitted by the inventory and report services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Product events
    ProductCreated(i64),
    ProductUpdated(i64),
    ProductDeleted(i64),
    ProductVerified {
        product_id: i64,
        verified_by: String,
    },

    // Purchase-intake events
    PurchaseItemsReceived {
        batch_id: Option<String>,
        count: usize,
    },

    // Warehouse slot events
    LocationAssigned {
        product_id: i64,
        location: String,
    },

    // Report events
    ReportCreated(i64),
    ReportUpdated(i64),
    ReportDeleted(i64),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel and logs every domain event. Runs as a
/// dedicated task for the lifetime of the process.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::PurchaseItemsReceived { batch_id, count } => {
                info!(?batch_id, count, "purchase items received into inventory");
            }
            Event::LocationAssigned {
                product_id,
                location,
            } => {
                info!(product_id, %location, "warehouse location assigned");
            }
            Event::ProductVerified {
                product_id,
                verified_by,
            } => {
                info!(product_id, %verified_by, "product verified");
            }
            other => {
                info!(event = ?other, "domain event");
            }
        }
    }
    info!("Event channel closed; event processor shutting down");
}
