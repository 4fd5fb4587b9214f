//! HTTP API hosting wizard sessions
//!
//! The presentation layer creates a session, renders the returned view and
//! posts user interactions back as events.

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::*;

use crate::delivery::OutboundMessage;
use crate::sessions::SessionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(outbound_tx: mpsc::Sender<OutboundMessage>, session_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(outbound_tx, session_ttl)),
        }
    }
}
