//! Message sink abstraction
//!
//! The sink receives the one composed message of a completed session. How it
//! reaches the downstream consumer is the sink's business.

#[cfg(test)]
pub mod testing;

use std::sync::Arc;
use thiserror::Error;

/// The sink could not accept a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeliveryError {
    pub message: String,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Destination for composed intake messages
pub trait MessageSink: Send + Sync {
    /// Accept a message for delivery. Must not block.
    fn deliver(&self, message: &str) -> Result<(), DeliveryError>;
}

impl<T: MessageSink + ?Sized> MessageSink for Arc<T> {
    fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        (**self).deliver(message)
    }
}

impl<T: MessageSink + ?Sized> MessageSink for &T {
    fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        (**self).deliver(message)
    }
}
