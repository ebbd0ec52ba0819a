//! Command dispatch: bridges CLI args -> controller operations -> output formatting.

pub mod bulbs;
pub mod config_cmd;
pub mod scenes;
pub mod util;

use wizly_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use bulbs::Verb;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List => bulbs::list(controller, global).await,
        Command::Scan => bulbs::scan(controller, global).await,
        Command::Get { address } => bulbs::get(controller, &address, global).await,
        Command::On(args) => bulbs::power(controller, &args, Verb::On, global).await,
        Command::Off(args) => bulbs::power(controller, &args, Verb::Off, global).await,
        Command::Scene(args) => bulbs::scene(controller, &args, Verb::Scene, global).await,
        Command::Toggle(args) => bulbs::scene(controller, &args, Verb::Toggle, global).await,
        Command::Rename { address, name } => {
            bulbs::rename(controller, &address, name.as_deref(), global).await
        }
        Command::Delete { address } => bulbs::delete(controller, &address, global).await,
        // Handled before a controller is built
        Command::Scenes | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
