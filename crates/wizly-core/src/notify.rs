// ── User notifications ──
//
// Transient, user-visible messages. Published on a broadcast channel;
// consumers that subscribe late miss earlier notifications.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::model::Device;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// An operation failed; `message` is already prefixed with the
    /// operation that failed.
    Error { message: String },
    /// An action came back reporting this device unreachable.
    Unreachable {
        address: String,
        display_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn error(err: &CoreError) -> Self {
        Self::now(NotificationKind::Error {
            message: err.to_string(),
        })
    }

    pub fn unreachable(device: &Device) -> Self {
        Self::now(NotificationKind::Unreachable {
            address: device.address.clone(),
            display_name: device.display_name.clone(),
        })
    }

    fn now(kind: NotificationKind) -> Self {
        Self {
            kind,
            raised_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NotificationKind::Error { .. })
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NotificationKind::Error { message } => f.write_str(message),
            NotificationKind::Unreachable { display_name, .. } => {
                write!(f, "'{display_name}' is down")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_uses_display_name() {
        let mut device = Device::new("10.0.0.7");
        device.display_name = "Desk".into();
        device.state = -1;
        assert_eq!(Notification::unreachable(&device).to_string(), "'Desk' is down");
    }

    #[test]
    fn error_message_is_passed_through() {
        let err = CoreError::Application {
            message: "no such bulb".into(),
        };
        let note = Notification::error(&err);
        assert!(note.is_error());
        assert_eq!(note.to_string(), "no such bulb");
    }
}
