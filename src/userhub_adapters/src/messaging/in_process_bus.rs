use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use super::{Delivery, MessageBus, MessageBusError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const CONSUMER_CHANNEL_CAPACITY: usize = 64;

/// In-process message bus: pattern-keyed mpsc channels with oneshot reply
/// slots. Stands in for the broker in tests and single-process wiring, with
/// the same request/reply and ack semantics consumers see in production.
#[derive(Clone)]
pub struct InProcessBus {
    routes: Arc<DashMap<String, mpsc::Sender<Delivery>>>,
    acked: Arc<AtomicUsize>,
    request_timeout: Duration,
}

impl Default for InProcessBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessBus {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(request_timeout: Duration) -> Self {
        Self {
            routes: Arc::new(DashMap::new()),
            acked: Arc::new(AtomicUsize::new(0)),
            request_timeout,
        }
    }

    /// Register a consumer for a pattern. A later registration for the same
    /// pattern replaces the earlier one.
    pub fn subscribe(&self, pattern: &str) -> mpsc::Receiver<Delivery> {
        let (tx, rx) = mpsc::channel(CONSUMER_CHANNEL_CAPACITY);
        self.routes.insert(pattern.to_string(), tx);
        rx
    }

    /// How many deliveries have been acked since the bus was created.
    pub fn acked_count(&self) -> usize {
        self.acked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageBus for InProcessBus {
    #[tracing::instrument(name = "Bus request", skip(self, payload), fields(pattern = pattern))]
    async fn request(&self, pattern: &str, payload: Value) -> Result<Value, MessageBusError> {
        let route = self
            .routes
            .get(pattern)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MessageBusError::NoRoute(pattern.to_string()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        let delivery = Delivery::new(
            pattern.to_string(),
            payload,
            reply_tx,
            Arc::clone(&self.acked),
        );

        route
            .send(delivery)
            .await
            .map_err(|_| MessageBusError::Transport("Consumer went away".to_string()))?;

        match tokio::time::timeout(self.request_timeout, reply_rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(MessageBusError::Transport(
                "Consumer dropped the reply".to_string(),
            )),
            Err(_) => Err(MessageBusError::Timeout),
        }
    }
}
