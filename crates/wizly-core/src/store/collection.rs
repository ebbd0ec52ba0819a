// ── Ordered device collection ──
//
// Insertion-ordered map keyed by address. Order is whatever the server
// returned on the last full load; partial merges never reorder.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::model::Device;

/// The device list, keyed by `address`, at most one entry per address.
///
/// Mutation is crate-private: only the controller's merge steps may
/// change a collection, and they do so on a copy-on-write snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCollection {
    by_address: IndexMap<String, Device>,
}

impl DeviceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a server-ordered list. A repeated address replaces the
    /// earlier record in the earlier record's position.
    pub fn from_devices(devices: impl IntoIterator<Item = Device>) -> Self {
        let mut by_address = IndexMap::new();
        for device in devices {
            by_address.insert(device.address.clone(), device);
        }
        Self { by_address }
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }

    pub fn get(&self, address: &str) -> Option<&Device> {
        self.by_address.get(address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.by_address.contains_key(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.by_address.values()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.by_address.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<Device> {
        self.by_address.values().cloned().collect()
    }

    // ── Merge steps ──────────────────────────────────────────────────

    /// Replace every local device whose address appears in `updates` with
    /// the server's record, wholesale. Addresses unknown locally are
    /// dropped. Returns the records that were applied, in collection order.
    pub(crate) fn merge(&mut self, updates: Vec<Device>) -> Vec<Device> {
        let mut lookup: HashMap<String, Device> = updates
            .into_iter()
            .map(|d| (d.address.clone(), d))
            .collect();

        let mut applied = Vec::with_capacity(lookup.len());
        for (address, device) in &mut self.by_address {
            if let Some(update) = lookup.remove(address) {
                *device = update.clone();
                applied.push(update);
            }
        }
        applied
    }

    /// Remove exactly the entry with this address, keeping the order of
    /// the rest.
    pub(crate) fn remove(&mut self, address: &str) -> Option<Device> {
        self.by_address.shift_remove(address)
    }
}

impl<'a> IntoIterator for &'a DeviceCollection {
    type Item = &'a Device;
    type IntoIter = indexmap::map::Values<'a, String, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_address.values()
    }
}

/// Serializes as a plain list in collection order.
impl Serialize for DeviceCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.by_address.values())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn device(address: &str, name: &str, state: i32) -> Device {
        Device {
            display_name: name.into(),
            state,
            ..Device::new(address)
        }
    }

    fn addresses(col: &DeviceCollection) -> Vec<&str> {
        col.addresses().collect()
    }

    #[test]
    fn from_devices_keeps_server_order() {
        let col = DeviceCollection::from_devices(vec![
            device("C", "c", 0),
            device("A", "a", 0),
            device("B", "b", 0),
        ]);
        assert_eq!(addresses(&col), vec!["C", "A", "B"]);
    }

    #[test]
    fn duplicate_address_keeps_first_position_last_value() {
        let col = DeviceCollection::from_devices(vec![
            device("A", "first", 0),
            device("B", "b", 0),
            device("A", "second", 1),
        ]);
        assert_eq!(col.len(), 2);
        assert_eq!(addresses(&col), vec!["A", "B"]);
        assert_eq!(col.get("A").unwrap().display_name, "second");
    }

    #[test]
    fn merge_replaces_by_address_not_position() {
        let mut col = DeviceCollection::from_devices(vec![device("A", "a", 0), device("B", "b", 0)]);
        let applied = col.merge(vec![device("B", "b", 1)]);

        assert_eq!(applied, vec![device("B", "b", 1)]);
        assert_eq!(col.to_vec(), vec![device("A", "a", 0), device("B", "b", 1)]);
    }

    #[test]
    fn merge_discards_local_fields() {
        let mut local = device("A", "Desk", 1);
        local.active_scene = Some("Forest".into());
        let mut col = DeviceCollection::from_devices(vec![local]);

        col.merge(vec![device("A", "Desk", 0)]);
        assert_eq!(col.get("A").unwrap().active_scene, None);
    }

    #[test]
    fn merge_ignores_unknown_addresses() {
        let mut col = DeviceCollection::from_devices(vec![device("A", "a", 0)]);
        let applied = col.merge(vec![device("Z", "z", 1)]);

        assert!(applied.is_empty());
        assert_eq!(addresses(&col), vec!["A"]);
    }

    #[test]
    fn remove_only_touches_matching_address() {
        let mut col = DeviceCollection::from_devices(vec![
            device("A", "Lamp", 0),
            device("B", "Lamp", 0),
            device("C", "c", 0),
        ]);
        let removed = col.remove("B").unwrap();

        assert_eq!(removed.address, "B");
        assert_eq!(addresses(&col), vec!["A", "C"]);
        assert!(col.remove("B").is_none());
    }

    #[test]
    fn serializes_as_ordered_list() {
        let col = DeviceCollection::from_devices(vec![device("B", "b", 0), device("A", "a", 1)]);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json[0]["address"], "B");
        assert_eq!(json[1]["state"], 1);
    }
}
