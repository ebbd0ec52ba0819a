// ── Operation outcomes ──

use strum::Display;

use crate::error::CoreError;

/// Why an operation ended without calling the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// Rename entered nothing but whitespace.
    EmptyName,
    /// The user cancelled the prompt or declined the confirmation.
    Declined,
    /// The same trigger already has an operation in flight.
    TriggerBusy,
}

/// Result of one user-triggered operation.
///
/// A failure has already been surfaced as a notification by the time the
/// caller sees `Failed`; the error is handed back for exit codes and tests.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Applied(T),
    Skipped(SkipReason),
    Failed(CoreError),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_is_not_an_error() {
        let outcome: Outcome<()> = Outcome::Skipped(SkipReason::TriggerBusy);
        assert_eq!(outcome.skip_reason(), Some(SkipReason::TriggerBusy));
        assert!(outcome.error().is_none());
        assert!(!outcome.is_failed());
    }

    #[test]
    fn failure_keeps_error() {
        let err = CoreError::Application {
            message: "nope".into(),
        };
        let outcome: Outcome<u8> = Outcome::Failed(err.clone());
        assert_eq!(outcome.error(), Some(&err));
        assert_eq!(outcome.applied(), None);
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::EmptyName.to_string(), "empty_name");
    }
}
