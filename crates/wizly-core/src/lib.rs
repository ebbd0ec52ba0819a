//! Reactive device list between `wizly-api` and UI consumers (the CLI).
//!
//! This crate owns the business logic, domain model, and reactive data
//! infrastructure for the wizly workspace:
//!
//! - **[`Controller`]**: Central facade. [`load_all()`](Controller::load_all)
//!   and [`scan_all()`](Controller::scan_all) replace the whole device list;
//!   actions, rename, delete, and refresh reconcile the backend's response
//!   into it by address. Failures become [`Notification`]s, never errors.
//!
//! - **[`DeviceStore`]**: `tokio::sync::watch`-backed storage of an
//!   address-keyed, server-ordered [`DeviceCollection`]. Every merge runs
//!   atomically on a copy-on-write snapshot.
//!
//! - **[`DeviceStream`]**: Subscription handle vended by the store.
//!   Exposes `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`TriggerRegistry`]**: Per-control single-flight. A control with a
//!   call in flight is skipped, never queued.
//!
//! - **Domain model** ([`model`]): [`Device`], [`Target`], [`SceneId`].

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod notify;
pub mod outcome;
pub mod prompt;
pub mod store;
pub mod stream;
pub mod trigger;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::Action;
pub use config::{ControllerConfig, DEFAULT_BACKEND};
pub use controller::Controller;
pub use error::CoreError;
pub use notify::{Notification, NotificationKind};
pub use outcome::{Outcome, SkipReason};
pub use prompt::{AssumeYes, Prompter, Scripted};
pub use store::{DeviceCollection, DeviceStore};
pub use stream::DeviceStream;
pub use trigger::{TriggerGuard, TriggerId, TriggerRegistry};

pub use model::{BROADCAST, Device, PowerState, Scene, SceneId, Target};
