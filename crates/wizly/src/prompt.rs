//! Terminal-backed `Prompter` built on `dialoguer`.

use dialoguer::{Confirm, Input};
use tracing::debug;

use wizly_core::Prompter;

/// Asks on the terminal; `--yes` answers every confirmation.
///
/// Dialogs block, so they run on the blocking pool. A failed dialog
/// (closed stdin, interrupted) counts as a decline.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompter {
    pub assume_yes: bool,
}

impl Prompter for TerminalPrompter {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let message = message.to_owned();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                debug!(error = %e, "confirmation prompt failed");
                false
            }
            Err(e) => {
                debug!(error = %e, "confirmation prompt task failed");
                false
            }
        }
    }

    async fn input(&self, message: &str, default: &str) -> Option<String> {
        let message = message.to_owned();
        let default = default.to_owned();
        let answer = tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(message)
                .default(default)
                .allow_empty(true)
                .interact_text()
        })
        .await;

        match answer {
            Ok(Ok(name)) => Some(name),
            Ok(Err(e)) => {
                debug!(error = %e, "input prompt failed");
                None
            }
            Err(e) => {
                debug!(error = %e, "input prompt task failed");
                None
            }
        }
    }
}
