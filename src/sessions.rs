//! Registry of live wizard sessions for the host service
//!
//! A session lives from creation until it completes, is discarded, or sits
//! idle for longer than the configured TTL. Nothing is persisted.

use crate::delivery::{ChannelSink, OutboundMessage};
use crate::error::WizardError;
use crate::session::WizardSession;
use crate::state_machine::{Event, Flow};
use crate::view::StepView;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

struct SessionEntry {
    session: WizardSession<ChannelSink>,
    /// Creation or most recent event, accepted or not
    last_activity: Instant,
}

/// Manager for all in-flight wizard sessions
pub struct SessionManager {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    outbound_tx: mpsc::Sender<OutboundMessage>,
    idle_ttl: Duration,
}

impl SessionManager {
    pub fn new(outbound_tx: mpsc::Sender<OutboundMessage>, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            outbound_tx,
            idle_ttl,
        }
    }

    /// Start a new session and return its id with the first step's view
    pub async fn create(&self, flow: Flow) -> (String, StepView) {
        let id = uuid::Uuid::new_v4().to_string();
        let sink = ChannelSink::new(&id, self.outbound_tx.clone());
        let session = WizardSession::with_id(&id, flow, sink);
        let view = session.view();

        self.sessions.write().await.insert(
            id.clone(),
            SessionEntry {
                session,
                last_activity: Instant::now(),
            },
        );
        tracing::info!(session_id = %id, flow = %flow, "Wizard session created");

        (id, view)
    }

    /// Current view. Reading does not count as activity.
    pub async fn view(&self, id: &str) -> Result<StepView, SessionError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .map(|entry| entry.session.view())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Apply an event. A session that completes is dropped from the registry;
    /// its final view is still returned.
    pub async fn handle(&self, id: &str, event: Event) -> Result<StepView, SessionError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        entry.last_activity = Instant::now();
        entry.session.handle(event)?;
        let view = entry.session.view();

        if entry.session.state().is_completed() {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Wizard session completed");
        }

        Ok(view)
    }

    /// Drop a session without delivering anything
    pub async fn discard(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| tracing::info!(session_id = %id, "Wizard session discarded"))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Drop every session idle for longer than the TTL. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, entry| {
            let idle = now.duration_since(entry.last_activity);
            let keep = idle <= self.idle_ttl;
            if !keep {
                tracing::info!(
                    session_id = %id,
                    idle_secs = idle.as_secs(),
                    "Idle wizard session evicted"
                );
            }
            keep
        });

        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Sweep idle sessions every `period`, forever
pub async fn run_sweeper(manager: Arc<SessionManager>, period: Duration) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let evicted = manager.evict_idle().await;
        if evicted > 0 {
            tracing::debug!(evicted, "Swept idle wizard sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::Step;

    const TTL: Duration = Duration::from_secs(60);

    fn manager() -> (SessionManager, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(4);
        (SessionManager::new(tx, TTL), rx)
    }

    #[tokio::test]
    async fn test_create_and_view() {
        let (manager, _rx) = manager();

        let (id, view) = manager.create(Flow::Wizard).await;
        assert_eq!(view.step, Some(Step::AreaSelection));
        assert_eq!(manager.view(&id).await.unwrap(), view);
        assert_eq!(manager.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let (manager, _rx) = manager();

        assert!(matches!(
            manager.view("missing").await,
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            manager.handle("missing", Event::Advance).await,
            Err(SessionError::NotFound(_))
        ));
        assert!(matches!(
            manager.discard("missing").await,
            Err(SessionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_completion_delivers_and_removes() {
        let (manager, mut rx) = manager();
        let (id, _) = manager.create(Flow::QuickPick).await;

        let view = manager
            .handle(&id, Event::pick_symptom("Pelvic pain"))
            .await
            .unwrap();

        assert!(view.completed);
        assert!(manager.is_empty().await);
        let outbound = rx.try_recv().unwrap();
        assert_eq!(outbound.session_id, id);
        assert_eq!(outbound.message, "I'm experiencing Pelvic pain");
    }

    #[tokio::test]
    async fn test_failed_delivery_keeps_session() {
        let (manager, rx) = manager();
        drop(rx);
        let (id, _) = manager.create(Flow::QuickPick).await;

        let err = manager
            .handle(&id, Event::pick_symptom("Pelvic pain"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Wizard(WizardError::Delivery(_))));
        assert_eq!(manager.len().await, 1);
        assert!(!manager.view(&id).await.unwrap().completed);
    }

    #[tokio::test]
    async fn test_discard() {
        let (manager, mut rx) = manager();
        let (id, _) = manager.create(Flow::Wizard).await;
        manager
            .handle(&id, Event::toggle_area("Pelvic"))
            .await
            .unwrap();

        manager.discard(&id).await.unwrap();

        assert!(manager.is_empty().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted() {
        let (manager, mut rx) = manager();
        let (idle, _) = manager.create(Flow::Wizard).await;
        manager
            .handle(&idle, Event::toggle_area("Pelvic"))
            .await
            .unwrap();

        tokio::time::advance(TTL / 2).await;
        let (fresh, _) = manager.create(Flow::Wizard).await;
        assert_eq!(manager.evict_idle().await, 0);

        tokio::time::advance(TTL / 2 + Duration::from_secs(1)).await;
        assert_eq!(manager.evict_idle().await, 1);

        assert!(matches!(
            manager.view(&idle).await,
            Err(SessionError::NotFound(_))
        ));
        assert!(manager.view(&fresh).await.is_ok());
        // Eviction never delivers
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_keep_a_session_alive() {
        let (manager, _rx) = manager();
        let (id, _) = manager.create(Flow::Wizard).await;

        for _ in 0..3 {
            tokio::time::advance(TTL - Duration::from_secs(1)).await;
            // Rejected events still count as activity
            let _ = manager.handle(&id, Event::Advance).await;
            assert_eq!(manager.evict_idle().await, 0);
        }

        assert_eq!(manager.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_abandoned_sessions() {
        let (manager, _rx) = manager();
        let manager = Arc::new(manager);
        manager.create(Flow::Wizard).await;
        manager.create(Flow::QuickPick).await;

        let sweeper = tokio::spawn(run_sweeper(manager.clone(), Duration::from_secs(10)));
        tokio::time::sleep(TTL + Duration::from_secs(30)).await;

        assert!(manager.is_empty().await);
        sweeper.abort();
    }
}
