// ── Runtime connection configuration ──
//
// Describes *how* to talk to a bulb backend. Never touches disk: the CLI
// resolves a profile and hands a `ControllerConfig` in.

use std::time::Duration;

use url::Url;

/// Backend address of a stock local install.
pub const DEFAULT_BACKEND: &str = "http://localhost:8001";

/// Configuration for driving a single backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Backend base URL (e.g., `http://localhost:8001`).
    pub backend: Url,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Upper bound on how long a load or a row action may run. A hung
    /// backend call fails with a timeout notification instead of leaving
    /// its trigger busy forever.
    pub action_timeout: Duration,
    /// Bound for a network scan. The backend probes every bulb before it
    /// answers, so this also replaces the per-request HTTP timeout.
    pub scan_timeout: Duration,
    /// Buffered notifications per subscriber before the slowest one lags.
    pub notification_capacity: usize,
}

impl ControllerConfig {
    pub fn new(backend: Url) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_action_timeout(mut self, action_timeout: Duration) -> Self {
        self.action_timeout = action_timeout;
        self
    }

    pub fn with_scan_timeout(mut self, scan_timeout: Duration) -> Self {
        self.scan_timeout = scan_timeout;
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            backend: Url::parse(DEFAULT_BACKEND).expect("default backend URL is valid"),
            timeout: Duration::from_secs(30),
            action_timeout: Duration::from_secs(15),
            scan_timeout: Duration::from_secs(120),
            notification_capacity: 64,
        }
    }
}
