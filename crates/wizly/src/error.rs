//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wizly_config::ConfigError;
use wizly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Backend ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(wizly::connection_failed),
        help(
            "Check that the bulb backend is running and reachable.\n\
             Current settings: wizly config show"
        )
    )]
    ConnectionFailed { message: String },

    #[error("{message}")]
    #[diagnostic(code(wizly::backend))]
    Backend { message: String, status: Option<u16> },

    #[error("{message}")]
    #[diagnostic(
        code(wizly::timeout),
        help("Increase the limit with --action-timeout or check backend responsiveness.")
    )]
    Timeout { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wizly::not_found),
        help("Run: wizly {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wizly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wizly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wizly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("{0}")]
    #[diagnostic(code(wizly::config))]
    Config(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(wizly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. }
            | Self::Backend {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport {
                message,
                status: None,
            } => CliError::ConnectionFailed { message },

            CoreError::Transport { message, status } => CliError::Backend { message, status },

            CoreError::Application { message } => CliError::Backend {
                message,
                status: None,
            },

            CoreError::Timeout { message, .. } => CliError::Timeout { message },

            CoreError::Config { message } => CliError::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_to_not_found_exit() {
        let err = CliError::from(CoreError::Transport {
            message: "Refresh 10.0.0.5: 404 Not Found".into(),
            status: Some(404),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "Refresh 10.0.0.5: 404 Not Found");
    }

    #[test]
    fn unreachable_backend_is_connection_failure() {
        let err = CliError::from(CoreError::Transport {
            message: "Load: HTTP transport error: connection refused".into(),
            status: None,
        });
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn timeout_has_its_own_exit_code() {
        let err = CliError::from(CoreError::Timeout {
            message: "Action: no response after 15s".into(),
            timeout_secs: 15,
        });
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
    }
}
