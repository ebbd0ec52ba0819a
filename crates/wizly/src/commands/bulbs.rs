//! Bulb command handlers: inventory, discovery, actions, and row edits.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use wizly_core::{Controller, Device, Target};

use crate::cli::{GlobalOpts, SceneArgs, TargetArgs};
use crate::error::CliError;
use crate::output;
use crate::prompt::TerminalPrompter;

use super::util::{self, Reporter};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BulbRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Scene")]
    scene: String,
}

impl From<&Device> for BulbRow {
    fn from(d: &Device) -> Self {
        Self {
            address: d.address.clone(),
            name: if d.has_custom_name() {
                d.display_name.clone()
            } else {
                String::new()
            },
            state: d.power_state().to_string(),
            scene: d.visible_scene().unwrap_or_default().to_owned(),
        }
    }
}

fn detail(d: &Device) -> String {
    [
        format!("Address: {}", d.address),
        format!("Name:    {}", d.display_name),
        format!("State:   {} ({})", d.power_state(), d.state),
        format!("Scene:   {}", d.visible_scene().unwrap_or("-")),
        format!(
            "Scene ID: {}",
            d.scene_id.map_or_else(|| "-".into(), |id| id.to_string())
        ),
    ]
    .join("\n")
}

fn render_devices(devices: &[Device], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        devices,
        |d| BulbRow::from(d),
        |d| d.address.clone(),
    );
    output::print_output(&out, global.quiet);
}

// ── Inventory ───────────────────────────────────────────────────────

pub async fn list(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let mut reporter = Reporter::new(controller, global);
    if let Some(snapshot) = reporter.settle(controller.load_all().await)? {
        render_devices(&snapshot.to_vec(), global);
    }
    Ok(())
}

pub async fn scan(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let mut reporter = Reporter::new(controller, global);

    let spinner = (!global.quiet && io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner());
        pb.set_message("Scanning for bulbs...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });
    let outcome = controller.scan_all().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if let Some(snapshot) = reporter.settle(outcome)? {
        render_devices(&snapshot.to_vec(), global);
    }
    Ok(())
}

pub async fn get(
    controller: &Controller,
    address: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut reporter = Reporter::new(controller, global);
    if let Some(device) = reporter.settle(controller.refresh_device(address).await)? {
        let out = output::render_single(&global.output, &device, detail, |d| {
            d.address.clone()
        });
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

// ── Actions ─────────────────────────────────────────────────────────

/// Which action a target command runs.
#[derive(Debug, Clone, Copy)]
pub enum Verb {
    On,
    Off,
    Scene,
    Toggle,
}

/// Load the inventory, check the target, then run the action and print
/// the devices it updated.
async fn run_action(
    controller: &Controller,
    target: &str,
    verb: Verb,
    scene: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut reporter = Reporter::new(controller, global);
    let scene = scene.map(util::parse_scene).transpose()?;
    util::load(controller, &mut reporter).await?;

    let target = Target::from(target);
    if let Target::Address(ref address) = target {
        util::find_device(controller, address)?;
    }

    let outcome = match (verb, scene) {
        (Verb::On, _) => controller.turn_on(target).await,
        (Verb::Off, _) => controller.turn_off(target).await,
        (Verb::Scene, Some(scene)) => controller.apply_scene(target, scene).await,
        (Verb::Toggle, Some(scene)) => controller.toggle_scene(target, scene).await,
        (Verb::Scene | Verb::Toggle, None) => {
            return Err(CliError::Validation {
                field: "scene".into(),
                reason: "a scene is required".into(),
            });
        }
    };

    if let Some(devices) = reporter.settle(outcome)? {
        render_devices(&devices, global);
    }
    Ok(())
}

pub async fn power(
    controller: &Controller,
    args: &TargetArgs,
    verb: Verb,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    run_action(controller, &args.target, verb, None, global).await
}

pub async fn scene(
    controller: &Controller,
    args: &SceneArgs,
    verb: Verb,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    run_action(controller, &args.target, verb, Some(&args.scene), global).await
}

// ── Row edits ───────────────────────────────────────────────────────

pub async fn rename(
    controller: &Controller,
    address: &str,
    name: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut reporter = Reporter::new(controller, global);
    util::load(controller, &mut reporter).await?;
    let device = util::find_device(controller, address)?;

    let outcome = match name {
        Some(name) => controller.rename(&device, name).await,
        None => {
            util::require_interactive("rename", global)?;
            let prompter = TerminalPrompter {
                assume_yes: global.yes,
            };
            controller.rename_with_prompt(&device, &prompter).await
        }
    };

    if let Some(devices) = reporter.settle(outcome)? {
        render_devices(&devices, global);
    }
    Ok(())
}

pub async fn delete(
    controller: &Controller,
    address: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut reporter = Reporter::new(controller, global);
    util::load(controller, &mut reporter).await?;
    let device = util::find_device(controller, address)?;
    util::require_interactive("delete", global)?;

    let prompter = TerminalPrompter {
        assume_yes: global.yes,
    };
    let outcome = controller.delete_device(&device, &prompter).await;

    if reporter.settle(outcome)?.is_some() && !global.quiet {
        eprintln!("Deleted '{}'", device.display_name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_hides_default_name_and_scene_while_off() {
        let mut d = Device::new("10.0.0.7");
        d.active_scene = Some("Forest".into());
        let row = BulbRow::from(&d);
        assert_eq!(row.name, "");
        assert_eq!(row.state, "off");
        assert_eq!(row.scene, "");

        d.state = 1;
        d.display_name = "Desk".into();
        let row = BulbRow::from(&d);
        assert_eq!(row.name, "Desk");
        assert_eq!(row.scene, "Forest");
    }

    #[test]
    fn detail_shows_raw_state() {
        let mut d = Device::new("10.0.0.7");
        d.state = -1;
        assert!(detail(&d).contains("unreachable (-1)"));
    }
}
