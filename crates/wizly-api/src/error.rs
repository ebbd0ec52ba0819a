use thiserror::Error;

/// Top-level error type for the `wizly-api` crate.
///
/// Separates the two ways the backend can refuse a call: a non-2xx
/// status line, and an application `error` field riding a 2xx response.
/// `wizly-core` maps both into user-facing notifications.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Backend URL cannot be used as a base: {url}")]
    InvalidBaseUrl { url: String },

    /// Non-2xx status from the backend. `reason` is the canonical status
    /// text (`"Not Found"`), empty for non-standard codes.
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    // ── Application ─────────────────────────────────────────────────
    /// 2xx response whose body carried `{"error": "..."}`.
    #[error("{message}")]
    Application { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// The HTTP status code, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_is_the_status_line() {
        let err = Error::Status {
            status: 500,
            reason: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn application_error_displays_verbatim() {
        let err = Error::Application {
            message: "Scan error: no route to host".into(),
        };
        assert_eq!(err.to_string(), "Scan error: no route to host");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn not_found_only_for_404() {
        let missing = Error::Status {
            status: 404,
            reason: "Not Found".into(),
        };
        let conflict = Error::Status {
            status: 409,
            reason: "Conflict".into(),
        };
        assert!(missing.is_not_found());
        assert!(!conflict.is_not_found());
    }
}
