//! Shared configuration for the wizly CLI.
//!
//! TOML profiles (one per bulb backend), layered loading, and translation
//! to `wizly_core::ControllerConfig`. The CLI adds `GlobalOpts`-aware
//! overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use wizly_core::{ControllerConfig, DEFAULT_BACKEND};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// The file `config init` writes: one `default` profile pointing at
    /// the local backend.
    pub fn starter() -> Self {
        let mut cfg = Self::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                backend: DEFAULT_BACKEND.into(),
                timeout: None,
                action_timeout: None,
                scan_timeout: None,
            },
        );
        cfg
    }

    /// Name of the profile to use: the explicit choice, else
    /// `default_profile`, else `"default"`.
    pub fn active_profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// HTTP request timeout, seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Upper bound on any single load or row action, seconds.
    #[serde(default = "default_action_timeout")]
    pub action_timeout: u64,

    /// Upper bound on a network scan, seconds.
    #[serde(default = "default_scan_timeout")]
    pub scan_timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            action_timeout: default_action_timeout(),
            scan_timeout: default_scan_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_action_timeout() -> u64 {
    15
}
fn default_scan_timeout() -> u64 {
    120
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:8001").
    pub backend: String,

    /// Override the request timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Override the action timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_timeout: Option<u64>,

    /// Override the scan timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wizly", "wizly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wizly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. Environment variables prefixed `WIZLY_`
/// override file values; nested keys use `__`
/// (`WIZLY_DEFAULTS__ACTION_TIMEOUT=20`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WIZLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse and check a backend URL: http(s) with a host.
pub fn parse_backend(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Validation {
            field: "backend".into(),
            reason: format!("expected an http(s) URL with a host, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build a `ControllerConfig` from a profile, falling back to the global
/// defaults for anything the profile does not override.
pub fn profile_to_controller_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ControllerConfig, ConfigError> {
    let backend = parse_backend(&profile.backend)?;
    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    let action_timeout = profile.action_timeout.unwrap_or(defaults.action_timeout);
    let scan_timeout = profile.scan_timeout.unwrap_or(defaults.scan_timeout);

    for (field, secs) in [("action_timeout", action_timeout), ("scan_timeout", scan_timeout)] {
        if secs == 0 {
            return Err(ConfigError::Validation {
                field: field.into(),
                reason: "must be at least 1 second".into(),
            });
        }
    }

    Ok(ControllerConfig::new(backend)
        .with_timeout(Duration::from_secs(timeout))
        .with_action_timeout(Duration::from_secs(action_timeout))
        .with_scan_timeout(Duration::from_secs(scan_timeout)))
}
