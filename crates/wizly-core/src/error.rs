// ── Core error types ──
//
// User-facing errors from wizly-core. Every variant's Display is the exact
// text surfaced to the user, already prefixed with the operation that
// failed. `from_api` turns transport-layer errors into that form.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Backend failures ─────────────────────────────────────────────
    /// The call failed at the HTTP level: non-2xx status, connection
    /// failure, or an unreadable body.
    #[error("{message}")]
    Transport {
        message: String,
        /// HTTP status code (if the server answered at all).
        status: Option<u16>,
    },

    /// The server answered 2xx but the body carried an `error` field.
    /// The message is the server's text, unprefixed.
    #[error("{message}")]
    Application { message: String },

    /// No response within the configured action timeout.
    #[error("{message}")]
    Timeout { message: String, timeout_secs: u64 },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Translate an API error, prefixing transport failures with the
    /// operation label (`"Load"`, `"Action"`, `"Cannot update Bulb Desk"`).
    pub fn from_api(prefix: &str, err: wizly_api::Error) -> Self {
        match err {
            wizly_api::Error::Status { status, reason } => Self::Transport {
                message: format!("{prefix}: {status} {reason}").trim_end().to_owned(),
                status: Some(status),
            },
            wizly_api::Error::Application { message } => Self::Application { message },
            wizly_api::Error::InvalidBaseUrl { url } => Self::Config {
                message: format!("Backend URL cannot be used as a base: {url}"),
            },
            other => Self::Transport {
                message: format!("{prefix}: {other}"),
                status: other.status(),
            },
        }
    }

    pub(crate) fn timeout(prefix: &str, timeout: std::time::Duration) -> Self {
        let timeout_secs = timeout.as_secs();
        Self::Timeout {
            message: format!("{prefix}: no response after {timeout:?}"),
            timeout_secs,
        }
    }

    /// HTTP status code, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the server itself reported the failure in its body.
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }
}

impl From<wizly_api::Error> for CoreError {
    fn from(err: wizly_api::Error) -> Self {
        Self::from_api("Request", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn status_failure_is_prefixed() {
        let err = CoreError::from_api(
            "Load",
            wizly_api::Error::Status {
                status: 500,
                reason: "Internal Server Error".into(),
            },
        );
        assert_eq!(err.to_string(), "Load: 500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn unknown_reason_does_not_leave_trailing_space() {
        let err = CoreError::from_api(
            "Scan",
            wizly_api::Error::Status {
                status: 599,
                reason: String::new(),
            },
        );
        assert_eq!(err.to_string(), "Scan: 599");
    }

    #[test]
    fn application_message_is_verbatim() {
        let err = CoreError::from_api(
            "Action",
            wizly_api::Error::Application {
                message: "bulb 10.0.0.9 unknown".into(),
            },
        );
        assert_eq!(err.to_string(), "bulb 10.0.0.9 unknown");
        assert!(err.is_application());
    }

    #[test]
    fn timeout_names_the_operation() {
        let err = CoreError::timeout("Action", Duration::from_secs(15));
        assert_eq!(err.to_string(), "Action: no response after 15s");
    }
}
