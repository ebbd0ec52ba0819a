// Shared transport configuration for building reqwest::Client instances.
//
// The backend is a plain-HTTP service on the local network; TLS and
// cookies are left to reqwest defaults. Only timeouts and the user agent
// are tunable.

use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("wizly/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout applied by reqwest.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(crate::error::Error::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_carries_crate_version() {
        let cfg = TransportConfig::default();
        assert!(cfg.user_agent.starts_with("wizly/"));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_timeout_overrides_only_the_request_timeout() {
        let cfg = TransportConfig::default().with_timeout(Duration::from_secs(3));
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
    }
}
