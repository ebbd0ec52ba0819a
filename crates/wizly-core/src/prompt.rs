// ── User prompts ──
//
// Rename and delete ask the user first. The controller only sees this
// trait; the CLI backs it with terminal dialogs, tests with canned answers.

use std::future::Future;

/// Answers the questions the controller asks before rename and delete.
pub trait Prompter: Send + Sync {
    /// Yes/no question. `false` means declined.
    fn confirm(&self, message: &str) -> impl Future<Output = bool> + Send;

    /// Free-text question pre-filled with `default`. `None` means cancelled.
    fn input(&self, message: &str, default: &str) -> impl Future<Output = Option<String>> + Send;
}

/// Confirms everything and accepts every default.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }

    async fn input(&self, _message: &str, default: &str) -> Option<String> {
        Some(default.to_owned())
    }
}

/// Fixed answers, for scripted callers.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    pub confirm: bool,
    pub input: Option<String>,
}

impl Prompter for Scripted {
    async fn confirm(&self, _message: &str) -> bool {
        self.confirm
    }

    async fn input(&self, _message: &str, _default: &str) -> Option<String> {
        self.input.clone()
    }
}
