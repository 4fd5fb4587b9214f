//! Host configuration
//!
//! Read once at startup from the environment. The wizard core itself is not
//! configurable.

use std::time::Duration;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Default capacity of the outbound message queue
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

/// Default idle time after which an unfinished session is dropped
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Where composed messages are POSTed; logged only when unset
    pub webhook_url: Option<String>,
    pub outbound_buffer: usize,
    /// Sessions with no events for this long are evicted
    pub session_ttl: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            webhook_url: None,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("INTAKE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            webhook_url: lookup("INTAKE_WEBHOOK_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            outbound_buffer: lookup("INTAKE_OUTBOUND_BUFFER")
                .and_then(|n| n.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.outbound_buffer),
            session_ttl: lookup("INTAKE_SESSION_TTL_SECS")
                .and_then(|secs| secs.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map_or(defaults.session_ttl, Duration::from_secs),
        }
    }

    /// How often idle sessions are swept: a quarter of the TTL, at least once a second
    pub fn sweep_interval(&self) -> Duration {
        (self.session_ttl / 4).max(Duration::from_secs(1))
    }
}
