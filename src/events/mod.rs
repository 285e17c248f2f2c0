use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

/// Domain events published by the HTTP layer after a successful write.
/// The admission service itself never publishes; handlers do, post-commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    OrderPlaced {
        order_id: i64,
        token_no: i32,
    },
    OrderItemStatusChanged {
        order_item_id: i64,
        status: String,
    },
    OrdersCompleted {
        order_ids: Vec<i64>,
    },
    OrdersCancelled {
        order_ids: Vec<i64>,
    },
    OrdersSettled {
        order_ids: Vec<i64>,
        invoice_id: i64,
    },
    ReservationCreated {
        reservation_id: i64,
    },
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

/// Background relay: drains the in-process event queue and fans each event
/// out to realtime subscribers (SSE streams hold a `relay` receiver).
/// Runs until every `EventSender` is dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>, relay: broadcast::Sender<Event>) {
    info!("Event relay started");
    while let Some(event) = rx.recv().await {
        debug!(?event, "relaying event");
        // A send error only means nobody is subscribed right now.
        let _ = relay.send(event);
    }
    info!("Event relay stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relay_forwards_events_to_subscribers() {
        let (tx, rx) = mpsc::channel(8);
        let (relay_tx, mut relay_rx) = broadcast::channel(8);
        let handle = tokio::spawn(process_events(rx, relay_tx));

        let sender = EventSender::new(tx);
        sender
            .send(Event::OrderPlaced {
                order_id: 42,
                token_no: 7,
            })
            .await
            .unwrap();

        match relay_rx.recv().await.unwrap() {
            Event::OrderPlaced { order_id, token_no } => {
                assert_eq!(order_id, 42);
                assert_eq!(token_no, 7);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        drop(sender);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn relay_survives_missing_subscribers() {
        let (tx, rx) = mpsc::channel(8);
        let (relay_tx, _) = broadcast::channel(8);
        let handle = tokio::spawn(process_events(rx, relay_tx));

        let sender = EventSender::new(tx);
        sender
            .send(Event::OrdersCancelled {
                order_ids: vec![1, 2],
            })
            .await
            .unwrap();

        drop(sender);
        handle.await.unwrap();
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let payload = serde_json::to_value(Event::OrderPlaced {
            order_id: 3,
            token_no: 1,
        })
        .unwrap();
        assert_eq!(payload["type"], "order_placed");
        assert_eq!(payload["token_no"], 1);
    }
}
