//! Clap derive structures for the `wizly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wizly -- control WiZ bulbs through a wizly backend
#[derive(Debug, Parser)]
#[command(
    name = "wizly",
    version,
    about = "Control WiZ smart bulbs from the command line",
    long_about = "Lists, discovers, switches, renames, and removes WiZ bulbs\n\
        through a bulb backend service. Every action reconciles the\n\
        backend's answer into the device list by address.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "WIZLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'b', env = "WIZLY_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WIZLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "WIZLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Upper bound on a load or single-bulb action in seconds (overrides profile)
    #[arg(long, env = "WIZLY_ACTION_TIMEOUT", global = true)]
    pub action_timeout: Option<u64>,

    /// Upper bound on a network scan in seconds (overrides profile)
    #[arg(long, env = "WIZLY_SCAN_TIMEOUT", global = true)]
    pub scan_timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the stored bulb inventory
    #[command(alias = "ls")]
    List,

    /// Discover bulbs on the network and replace the inventory
    Scan,

    /// Show one bulb as currently stored
    Get {
        /// Bulb IP address
        address: String,
    },

    /// Switch a bulb (or `all`) on
    On(TargetArgs),

    /// Switch a bulb (or `all`) off
    Off(TargetArgs),

    /// Apply a scene to a bulb (or `all`)
    Scene(SceneArgs),

    /// Apply a scene, or switch off bulbs already showing it
    Toggle(SceneArgs),

    /// Rename a bulb (prompts when no name is given)
    Rename {
        /// Bulb IP address
        address: String,

        /// New name
        name: Option<String>,
    },

    /// Remove a bulb from the inventory
    #[command(alias = "rm")]
    Delete {
        /// Bulb IP address
        address: String,
    },

    /// List known scene names and codes
    Scenes,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Action Arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Bulb IP address, or `all`
    pub target: String,
}

#[derive(Debug, Args)]
pub struct SceneArgs {
    /// Bulb IP address, or `all`
    pub target: String,

    /// Scene name (e.g. `forest`, `warm-white`) or integer code
    pub scene: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the active profile
    Set {
        /// Key: backend, timeout, action_timeout, scan_timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
