// ── Controller abstraction ──
//
// Single source of truth for the device list. Mediates every backend call
// that refreshes or mutates it, reconciles responses by address, and
// reports failures as notifications instead of errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast, watch};
use tracing::{debug, info, warn};

use wizly_api::{BulbClient, BulbRecord, TransportConfig};

use crate::command::Action;
use crate::config::ControllerConfig;
use crate::error::CoreError;
use crate::model::{Device, SceneId, Target};
use crate::notify::Notification;
use crate::outcome::{Outcome, SkipReason};
use crate::prompt::Prompter;
use crate::store::{DeviceCollection, DeviceStore};
use crate::stream::DeviceStream;
use crate::trigger::{TriggerGuard, TriggerId, TriggerRegistry};

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Row operations (actions,
/// rename, delete, refresh) run concurrently, one per trigger. Full
/// replaces (load, scan) wait for in-flight row operations and hold off
/// new ones until they finish.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    client: BulbClient,
    store: DeviceStore,
    notifications: broadcast::Sender<Notification>,
    triggers: Arc<TriggerRegistry>,
    /// Row operations hold it shared, full replaces exclusive.
    gate: RwLock<()>,
    /// Full replaces pending or running.
    pending_replaces: watch::Sender<usize>,
}

impl Controller {
    /// Create a controller for one backend. Makes no network call; the
    /// device list starts empty until [`load_all()`](Self::load_all).
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = BulbClient::new(config.backend.clone(), &transport)
            .map_err(|e| CoreError::from_api("Client", e))?;
        Ok(Self::with_client(config, client))
    }

    /// Create a controller around a pre-built API client.
    pub fn with_client(config: ControllerConfig, client: BulbClient) -> Self {
        let (notifications, _) = broadcast::channel(config.notification_capacity.max(1));
        let (pending_replaces, _) = watch::channel(0);

        Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store: DeviceStore::new(),
                notifications,
                triggers: Arc::new(TriggerRegistry::new()),
                gate: RwLock::new(()),
                pending_replaces,
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    // ── Full replace ─────────────────────────────────────────────

    /// Fetch the persisted inventory and replace the whole list with it.
    pub async fn load_all(&self) -> Outcome<Arc<DeviceCollection>> {
        let client = &self.inner.client;
        let limit = self.inner.config.action_timeout;
        self.full_replace("Load", limit, client.list_bulbs()).await
    }

    /// Run backend discovery and replace the whole list with what it found.
    ///
    /// Bounded by `scan_timeout` rather than the action timeout.
    pub async fn scan_all(&self) -> Outcome<Arc<DeviceCollection>> {
        let client = &self.inner.client;
        let limit = self.inner.config.scan_timeout;
        self.full_replace("Scan", limit, client.scan(limit)).await
    }

    async fn full_replace(
        &self,
        operation: &'static str,
        limit: Duration,
        call: impl Future<Output = Result<Vec<BulbRecord>, wizly_api::Error>>,
    ) -> Outcome<Arc<DeviceCollection>> {
        let _busy = BusyGuard::enter(&self.inner.pending_replaces);
        let _exclusive = self.inner.gate.write().await;

        match self.bounded_for(operation, limit, call).await {
            Ok(records) => {
                let collection =
                    DeviceCollection::from_devices(records.into_iter().map(Device::from));
                let snapshot = self.inner.store.replace(collection);
                info!(operation, devices = snapshot.len(), "device list replaced");
                Outcome::Applied(snapshot)
            }
            Err(err) => self.surface(err),
        }
    }

    // ── Actions ──────────────────────────────────────────────────

    /// Dispatch an action on behalf of `trigger` and reconcile the
    /// returned records by address.
    ///
    /// Skipped if `trigger` already has an operation in flight. Every
    /// reconciled record that comes back unreachable raises one
    /// [`Notification`] naming the device.
    pub async fn invoke(&self, action: &Action, trigger: TriggerId) -> Outcome<Vec<Device>> {
        let Some(_guard) = self.acquire(trigger.clone()) else {
            return Outcome::Skipped(SkipReason::TriggerBusy);
        };
        let _shared = self.inner.gate.read().await;

        debug!(%action, %trigger, "dispatching action");
        match self.bounded("Action", action.dispatch(&self.inner.client)).await {
            Ok(records) => {
                let applied = self.reconcile(records);
                for device in applied.iter().filter(|d| d.is_unreachable()) {
                    self.publish(Notification::unreachable(device));
                }
                Outcome::Applied(applied)
            }
            Err(err) => self.surface(err),
        }
    }

    pub async fn turn_on(&self, target: impl Into<Target>) -> Outcome<Vec<Device>> {
        let action = Action::PowerOn(target.into());
        self.invoke(&action, action.default_trigger()).await
    }

    pub async fn turn_off(&self, target: impl Into<Target>) -> Outcome<Vec<Device>> {
        let action = Action::PowerOff(target.into());
        self.invoke(&action, action.default_trigger()).await
    }

    pub async fn apply_scene(
        &self,
        target: impl Into<Target>,
        scene: impl Into<SceneId>,
    ) -> Outcome<Vec<Device>> {
        let action = Action::ApplyScene(target.into(), scene.into());
        self.invoke(&action, action.default_trigger()).await
    }

    /// Apply `scene`, or switch off if it is already the active scene.
    pub async fn toggle_scene(
        &self,
        target: impl Into<Target>,
        scene: impl Into<SceneId>,
    ) -> Outcome<Vec<Device>> {
        let action = Action::ToggleScene(target.into(), scene.into());
        self.invoke(&action, action.default_trigger()).await
    }

    // ── Row edits ────────────────────────────────────────────────

    /// Rename `device`. A name that is empty after trimming is a no-op.
    pub async fn rename(&self, device: &Device, new_name: &str) -> Outcome<Vec<Device>> {
        let Some(_guard) = self.acquire(TriggerId::rename(&device.address)) else {
            return Outcome::Skipped(SkipReason::TriggerBusy);
        };
        self.rename_held(device, new_name).await
    }

    /// Ask for a new name, pre-filled with the current one, then rename.
    pub async fn rename_with_prompt<P: Prompter>(
        &self,
        device: &Device,
        prompter: &P,
    ) -> Outcome<Vec<Device>> {
        let Some(_guard) = self.acquire(TriggerId::rename(&device.address)) else {
            return Outcome::Skipped(SkipReason::TriggerBusy);
        };
        let question = format!("Name of bulb {}?", device.address);
        match prompter.input(&question, &device.display_name).await {
            Some(name) => self.rename_held(device, &name).await,
            None => Outcome::Skipped(SkipReason::Declined),
        }
    }

    async fn rename_held(&self, device: &Device, new_name: &str) -> Outcome<Vec<Device>> {
        let name = new_name.trim();
        if name.is_empty() {
            return Outcome::Skipped(SkipReason::EmptyName);
        }
        let _shared = self.inner.gate.read().await;

        let mut record = BulbRecord::from(device);
        record.name = Some(name.to_owned());

        let prefix = format!("Cannot update Bulb {name}");
        match self.bounded(&prefix, self.inner.client.update_bulb(&record)).await {
            Ok(records) => {
                debug!(address = %device.address, name, "bulb renamed");
                Outcome::Applied(self.reconcile(records))
            }
            Err(err) => self.surface(err),
        }
    }

    /// Delete `device` after the user confirms. Only the entry with the
    /// same address is removed, whatever its name.
    pub async fn delete_device<P: Prompter>(&self, device: &Device, prompter: &P) -> Outcome<()> {
        let Some(_guard) = self.acquire(TriggerId::delete(&device.address)) else {
            return Outcome::Skipped(SkipReason::TriggerBusy);
        };
        let question = format!("Delete '{}'?", device.display_name);
        if !prompter.confirm(&question).await {
            return Outcome::Skipped(SkipReason::Declined);
        }
        let _shared = self.inner.gate.read().await;

        let prefix = format!("Cannot delete Bulb {}", device.display_name);
        let call = self.inner.client.delete_bulb(&device.address);
        match self.bounded(&prefix, call).await {
            Ok(()) => {
                self.inner.store.remove(&device.address);
                info!(address = %device.address, "bulb deleted");
                Outcome::Applied(())
            }
            Err(err) => self.surface(err),
        }
    }

    /// Re-read one device from the inventory and merge it in place.
    pub async fn refresh_device(&self, address: &str) -> Outcome<Device> {
        let Some(_guard) = self.acquire(TriggerId::refresh(address)) else {
            return Outcome::Skipped(SkipReason::TriggerBusy);
        };
        let _shared = self.inner.gate.read().await;

        let prefix = format!("Refresh {address}");
        match self.bounded(&prefix, self.inner.client.get_bulb(address)).await {
            Ok(record) => {
                let device = Device::from(record);
                self.inner.store.merge(vec![device.clone()]);
                Outcome::Applied(device)
            }
            Err(err) => self.surface(err),
        }
    }

    // ── State observation ────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<DeviceCollection> {
        self.inner.store.snapshot()
    }

    pub fn get(&self, address: &str) -> Option<Device> {
        self.inner.store.get(address)
    }

    /// Subscribe to device list changes.
    pub fn devices(&self) -> DeviceStream {
        self.inner.store.subscribe()
    }

    /// Subscribe to user notifications raised from now on.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    /// Number of full replaces pending or running; non-zero means busy.
    pub fn busy(&self) -> watch::Receiver<usize> {
        self.inner.pending_replaces.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        *self.inner.pending_replaces.borrow() > 0
    }

    pub fn is_trigger_busy(&self, trigger: &TriggerId) -> bool {
        self.inner.triggers.is_busy(trigger)
    }

    /// When the list was last replaced by a load or scan.
    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        self.inner.store.last_full_refresh()
    }

    // ── Helpers ──────────────────────────────────────────────────

    fn acquire(&self, trigger: TriggerId) -> Option<TriggerGuard> {
        let guard = self.inner.triggers.try_acquire(trigger.clone());
        if guard.is_none() {
            let since = self.inner.triggers.busy_since(&trigger);
            debug!(%trigger, ?since, "trigger busy, skipping");
        }
        guard
    }

    /// Await a backend call under the action timeout.
    async fn bounded<T>(
        &self,
        prefix: &str,
        call: impl Future<Output = Result<T, wizly_api::Error>>,
    ) -> Result<T, CoreError> {
        self.bounded_for(prefix, self.inner.config.action_timeout, call).await
    }

    async fn bounded_for<T>(
        &self,
        prefix: &str,
        limit: Duration,
        call: impl Future<Output = Result<T, wizly_api::Error>>,
    ) -> Result<T, CoreError> {
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(|e| CoreError::from_api(prefix, e)),
            Err(_) => Err(CoreError::timeout(prefix, limit)),
        }
    }

    fn reconcile(&self, records: Vec<BulbRecord>) -> Vec<Device> {
        let updates = records.into_iter().map(Device::from).collect();
        self.inner.store.merge(updates)
    }

    fn surface<T>(&self, err: CoreError) -> Outcome<T> {
        warn!(error = %err, "operation failed");
        self.publish(Notification::error(&err));
        Outcome::Failed(err)
    }

    fn publish(&self, notification: Notification) {
        // No subscribers is fine.
        let _ = self.inner.notifications.send(notification);
    }
}

// ── Busy flag ────────────────────────────────────────────────────

struct BusyGuard<'a> {
    pending: &'a watch::Sender<usize>,
}

impl<'a> BusyGuard<'a> {
    fn enter(pending: &'a watch::Sender<usize>) -> Self {
        pending.send_modify(|n| *n += 1);
        Self { pending }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }
}
