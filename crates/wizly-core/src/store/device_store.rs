// ── Reactive device store ──
//
// Holds the current collection as an `Arc` snapshot inside a `watch`
// channel. Every mutation runs to completion inside the channel's write
// lock with no await point, so readers only ever see whole snapshots.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::DeviceCollection;
use crate::model::Device;
use crate::stream::DeviceStream;

/// Reactive store for the device collection.
///
/// Mutations are copy-on-write: a snapshot handed out earlier is never
/// changed underneath its holder.
pub struct DeviceStore {
    devices: watch::Sender<Arc<DeviceCollection>>,
    last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DeviceStore {
    pub fn new() -> Self {
        let (devices, _) = watch::channel(Arc::new(DeviceCollection::new()));
        let (last_full_refresh, _) = watch::channel(None);

        Self {
            devices,
            last_full_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<DeviceCollection> {
        self.devices.borrow().clone()
    }

    pub fn get(&self, address: &str) -> Option<Device> {
        self.devices.borrow().get(address).cloned()
    }

    pub fn subscribe(&self) -> DeviceStream {
        DeviceStream::new(self.devices.subscribe())
    }

    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Swap in a whole new collection.
    pub(crate) fn replace(&self, collection: DeviceCollection) -> Arc<DeviceCollection> {
        let next = Arc::new(collection);
        self.devices.send_replace(Arc::clone(&next));
        let _ = self.last_full_refresh.send_replace(Some(Utc::now()));
        next
    }

    /// Apply a partial update; subscribers are woken only if something
    /// was actually replaced.
    pub(crate) fn merge(&self, updates: Vec<Device>) -> Vec<Device> {
        let mut applied = Vec::new();
        self.devices.send_if_modified(|snap| {
            if !updates.iter().any(|d| snap.contains(&d.address)) {
                return false;
            }
            applied = Arc::make_mut(snap).merge(updates);
            true
        });
        applied
    }

    /// Remove one device by address.
    pub(crate) fn remove(&self, address: &str) -> Option<Device> {
        let mut removed = None;
        self.devices.send_if_modified(|snap| {
            if !snap.contains(address) {
                return false;
            }
            removed = Arc::make_mut(snap).remove(address);
            true
        });
        removed
    }
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn device(address: &str, state: i32) -> Device {
        Device {
            state,
            ..Device::new(address)
        }
    }

    #[test]
    fn earlier_snapshots_are_not_mutated() {
        let store = DeviceStore::new();
        store.replace(DeviceCollection::from_devices(vec![device("A", 0)]));
        let before = store.snapshot();

        store.merge(vec![device("A", 1)]);

        assert_eq!(before.get("A").unwrap().state, 0);
        assert_eq!(store.snapshot().get("A").unwrap().state, 1);
    }

    #[test]
    fn replace_records_refresh_time() {
        let store = DeviceStore::new();
        assert!(store.last_full_refresh().is_none());
        store.replace(DeviceCollection::new());
        assert!(store.last_full_refresh().is_some());
    }

    #[tokio::test]
    async fn merge_without_match_does_not_wake_subscribers() {
        let store = DeviceStore::new();
        store.replace(DeviceCollection::from_devices(vec![device("A", 0)]));
        let mut stream = store.subscribe();

        store.merge(vec![device("Z", 1)]);
        store.remove("Z");
        assert!(!stream.has_changed());

        store.merge(vec![device("A", 1)]);
        assert!(stream.has_changed());
    }
}
