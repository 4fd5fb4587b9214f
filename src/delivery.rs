//! Outbound delivery for the host service
//!
//! Sessions hand composed messages to a `ChannelSink`, which queues them
//! without blocking. A background task drains the queue through a
//! `Forwarder`. Forwarding is fire-and-forget: failures are logged, not retried.

use crate::config::HostConfig;
use crate::sink::{DeliveryError, MessageSink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// A composed message on its way to the downstream consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub session_id: String,
    pub message: String,
    pub composed_at: DateTime<Utc>,
}

/// Message sink that enqueues onto the outbound channel
pub struct ChannelSink {
    session_id: String,
    tx: mpsc::Sender<OutboundMessage>,
}

impl ChannelSink {
    pub fn new(session_id: impl Into<String>, tx: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            session_id: session_id.into(),
            tx,
        }
    }
}

impl MessageSink for ChannelSink {
    fn deliver(&self, message: &str) -> Result<(), DeliveryError> {
        let outbound = OutboundMessage {
            session_id: self.session_id.clone(),
            message: message.to_string(),
            composed_at: Utc::now(),
        };
        self.tx.try_send(outbound).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::new("outbound queue is full"),
            TrySendError::Closed(_) => DeliveryError::new("outbound queue is closed"),
        })
    }
}

/// Transport to the downstream consumer
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, outbound: &OutboundMessage) -> Result<(), DeliveryError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// POSTs each message as JSON to a fixed URL
pub struct WebhookForwarder {
    client: reqwest::Client,
    url: String,
}

impl WebhookForwarder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Forwarder for WebhookForwarder {
    async fn forward(&self, outbound: &OutboundMessage) -> Result<(), DeliveryError> {
        self.client
            .post(&self.url)
            .json(outbound)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DeliveryError::new(format!("webhook request failed: {e}")))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Writes each message to the log; used when no webhook is configured
pub struct LogForwarder;

#[async_trait]
impl Forwarder for LogForwarder {
    async fn forward(&self, outbound: &OutboundMessage) -> Result<(), DeliveryError> {
        tracing::info!(
            session_id = %outbound.session_id,
            composed_at = %outbound.composed_at,
            message = %outbound.message,
            "Intake message ready"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

pub fn forwarder_from_config(config: &HostConfig) -> Arc<dyn Forwarder> {
    match &config.webhook_url {
        Some(url) => Arc::new(WebhookForwarder::new(url.clone())),
        None => Arc::new(LogForwarder),
    }
}

/// Drain the outbound queue until every sender is dropped
pub async fn run_forwarder(mut rx: mpsc::Receiver<OutboundMessage>, forwarder: Arc<dyn Forwarder>) {
    tracing::info!(forwarder = forwarder.name(), "Outbound forwarder started");

    while let Some(outbound) = rx.recv().await {
        match forwarder.forward(&outbound).await {
            Ok(()) => {
                tracing::debug!(session_id = %outbound.session_id, "Intake message forwarded");
            }
            Err(e) => {
                tracing::error!(
                    session_id = %outbound.session_id,
                    forwarder = forwarder.name(),
                    error = %e,
                    "Failed to forward intake message"
                );
            }
        }
    }

    tracing::info!("Outbound queue closed, forwarder stopped");
}
