pub mod in_process_bus;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::oneshot;

pub use in_process_bus::InProcessBus;

#[derive(Debug, Error)]
pub enum MessageBusError {
    #[error("No consumer registered for pattern: {0}")]
    NoRoute(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Bus transport error: {0}")]
    Transport(String),
}

impl PartialEq for MessageBusError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoRoute(_), Self::NoRoute(_)) => true,
            (Self::Timeout, Self::Timeout) => true,
            (Self::Transport(_), Self::Transport(_)) => true,
            _ => false,
        }
    }
}

/// Request/reply side of the message bus, as seen by a caller.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn request(&self, pattern: &str, payload: Value) -> Result<Value, MessageBusError>;
}

/// One message handed to a consumer.
///
/// Acking moves the token out of the delivery, so a second `ack` on the
/// same message is unrepresentable rather than merely discouraged. Replying
/// consumes the delivery outright.
pub struct Delivery {
    pattern: String,
    payload: Value,
    reply: Option<oneshot::Sender<Value>>,
    ack: Option<AckToken>,
}

struct AckToken {
    acked: Arc<AtomicUsize>,
}

impl Delivery {
    pub(crate) fn new(
        pattern: String,
        payload: Value,
        reply: oneshot::Sender<Value>,
        acked: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            pattern,
            payload,
            reply: Some(reply),
            ack: Some(AckToken { acked }),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Confirm the message so the broker will not redeliver it. No-op on a
    /// delivery that was already acked.
    pub fn ack(&mut self) {
        if let Some(token) = self.ack.take() {
            token.acked.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn reply(mut self, value: Value) -> Result<(), MessageBusError> {
        let sender = self
            .reply
            .take()
            .ok_or_else(|| MessageBusError::Transport("Reply already sent".to_string()))?;
        sender
            .send(value)
            .map_err(|_| MessageBusError::Transport("Requester went away".to_string()))
    }
}
