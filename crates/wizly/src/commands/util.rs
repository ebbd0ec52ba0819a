//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use tokio::sync::broadcast;

use wizly_core::{Controller, Device, Notification, Outcome, SceneId, SkipReason};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Turns operation outcomes into CLI results and relays notifications.
///
/// Subscribes on creation, so it sees every notification raised by
/// operations started afterwards.
pub struct Reporter {
    notes: broadcast::Receiver<Notification>,
    color: bool,
    quiet: bool,
}

impl Reporter {
    pub fn new(controller: &Controller, global: &GlobalOpts) -> Self {
        Self {
            notes: controller.notifications(),
            color: output::should_color(&global.color),
            quiet: global.quiet,
        }
    }

    /// Print pending notifications, then map the outcome. Failure
    /// notifications are not printed: the failure itself becomes the
    /// command's error report.
    pub fn settle<T>(&mut self, outcome: Outcome<T>) -> Result<Option<T>, CliError> {
        while let Ok(note) = self.notes.try_recv() {
            if !note.is_error() {
                output::print_notification(&note, self.color, self.quiet);
            }
        }

        match outcome {
            Outcome::Applied(value) => Ok(Some(value)),
            Outcome::Skipped(reason) => {
                if !self.quiet {
                    eprintln!("{}", skip_message(reason));
                }
                Ok(None)
            }
            Outcome::Failed(err) => Err(err.into()),
        }
    }
}

fn skip_message(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::EmptyName => "Name is empty, nothing changed",
        SkipReason::Declined => "Aborted",
        SkipReason::TriggerBusy => "Already in progress",
    }
}

/// Load the inventory so later merges have rows to land on.
pub async fn load(controller: &Controller, reporter: &mut Reporter) -> Result<(), CliError> {
    reporter.settle(controller.load_all().await)?;
    Ok(())
}

/// Look up a loaded device by address.
pub fn find_device(controller: &Controller, address: &str) -> Result<Device, CliError> {
    controller.get(address).ok_or_else(|| CliError::NotFound {
        resource_type: "bulb".into(),
        identifier: address.into(),
        list_command: "list".into(),
    })
}

/// Parse a scene name or integer code.
pub fn parse_scene(raw: &str) -> Result<SceneId, CliError> {
    raw.parse().map_err(|reason| CliError::Validation {
        field: "scene".into(),
        reason,
    })
}

/// Refuse to prompt when nobody can answer.
pub fn require_interactive(action: &str, global: &GlobalOpts) -> Result<(), CliError> {
    if global.yes || io::stdin().is_terminal() {
        return Ok(());
    }
    Err(CliError::NonInteractiveRequiresYes {
        action: action.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_names_and_codes_parse() {
        assert_eq!(parse_scene("forest").ok(), Some(SceneId(27)));
        assert_eq!(parse_scene("7").ok(), Some(SceneId(7)));
        assert!(matches!(parse_scene("disco"), Err(CliError::Validation { .. })));
    }
}
