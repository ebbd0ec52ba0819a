//! CLI configuration: thin wrapper around `wizly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--backend, --timeout, etc.).

use std::time::Duration;

use wizly_core::{ControllerConfig, DEFAULT_BACKEND};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use wizly_config::{
    Config, Profile, config_path, load_config_or_default, parse_backend,
    profile_to_controller_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Build a `ControllerConfig` from the config file, profile, and flags.
///
/// Flags beat the profile, the profile beats `[defaults]`. With no
/// profile on disk the backend comes from `--backend`, falling back to
/// the local default, unless a profile was asked for by name.
pub fn resolve_controller_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ControllerConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut resolved = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile_to_controller_config(profile, &cfg.defaults)?,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None => {
            let fallback = Profile {
                backend: DEFAULT_BACKEND.into(),
                timeout: None,
                action_timeout: None,
                scan_timeout: None,
            };
            profile_to_controller_config(&fallback, &cfg.defaults)?
        }
    };

    if let Some(ref backend) = global.backend {
        resolved.backend = parse_backend(backend)?;
    }
    if let Some(secs) = global.timeout {
        resolved.timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = global.action_timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "action-timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        resolved.action_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = global.scan_timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "scan-timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        resolved.scan_timeout = Duration::from_secs(secs);
    }

    Ok(resolved)
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        return "(none)".into();
    }
    cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
}
