//! Sink doubles for testing
//!
//! These record or reject deliveries without any I/O.

use super::{DeliveryError, MessageSink};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Records every delivered message
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

impl MessageSink for RecordingSink {
    fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

/// Fails the first `failures` deliveries, then records like `RecordingSink`
pub struct FlakySink {
    remaining_failures: AtomicUsize,
    inner: RecordingSink,
}

impl FlakySink {
    pub fn failing(failures: usize) -> Self {
        Self {
            remaining_failures: AtomicUsize::new(failures),
            inner: RecordingSink::new(),
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.inner.delivered()
    }
}

impl MessageSink for FlakySink {
    fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        let failed = self
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(DeliveryError::new("sink unavailable"));
        }
        self.inner.deliver(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.deliver("one").unwrap();
        sink.deliver("two").unwrap();
        assert_eq!(sink.delivered(), vec!["one", "two"]);
    }

    #[test]
    fn test_flaky_sink_recovers() {
        let sink = FlakySink::failing(2);
        assert!(sink.deliver("a").is_err());
        assert!(sink.deliver("b").is_err());
        sink.deliver("c").unwrap();
        assert_eq!(sink.delivered(), vec!["c"]);
    }
}
