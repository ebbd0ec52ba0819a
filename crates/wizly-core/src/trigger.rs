// ── Per-trigger single-flight ──
//
// A trigger names one user-facing control (one row's "On" button, the
// rename button of one device). While a trigger's operation is in
// flight, a second invocation of the same trigger is skipped. Distinct
// triggers never block each other.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};

/// Identity of a user-facing control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(String);

impl TriggerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn rename(address: &str) -> Self {
        Self(format!("rename:{address}"))
    }

    pub fn delete(address: &str) -> Self {
        Self(format!("delete:{address}"))
    }

    pub fn refresh(address: &str) -> Self {
        Self(format!("refresh:{address}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TriggerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TriggerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The set of triggers with an operation in flight, and when each started.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    in_flight: DashMap<TriggerId, DateTime<Utc>>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` busy. Returns `None` if it already is; otherwise the
    /// returned guard releases it on drop, on every exit path.
    pub fn try_acquire(self: &Arc<Self>, id: TriggerId) -> Option<TriggerGuard> {
        match self.in_flight.entry(id.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(Utc::now());
                Some(TriggerGuard {
                    registry: Arc::clone(self),
                    id,
                })
            }
        }
    }

    pub fn is_busy(&self, id: &TriggerId) -> bool {
        self.in_flight.contains_key(id)
    }

    /// When the operation currently holding `id` started.
    pub fn busy_since(&self, id: &TriggerId) -> Option<DateTime<Utc>> {
        self.in_flight.get(id).map(|entry| *entry.value())
    }
}

/// Holds a trigger busy until dropped.
#[derive(Debug)]
pub struct TriggerGuard {
    registry: Arc<TriggerRegistry>,
    id: TriggerId,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.registry.in_flight.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_of_same_trigger_is_refused() {
        let registry = Arc::new(TriggerRegistry::new());
        let guard = registry.try_acquire("on:10.0.0.7".into());
        assert!(guard.is_some());
        assert!(registry.try_acquire("on:10.0.0.7".into()).is_none());
        assert!(registry.is_busy(&"on:10.0.0.7".into()));
    }

    #[test]
    fn distinct_triggers_do_not_block() {
        let registry = Arc::new(TriggerRegistry::new());
        let _on = registry.try_acquire("on:10.0.0.7".into());
        assert!(registry.try_acquire("off:10.0.0.7".into()).is_some());
        assert!(registry.try_acquire("on:10.0.0.8".into()).is_some());
    }

    #[test]
    fn dropping_guard_releases_trigger() {
        let registry = Arc::new(TriggerRegistry::new());
        let id = TriggerId::rename("10.0.0.7");
        let guard = registry.try_acquire(id.clone());
        assert!(registry.busy_since(&id).is_some());
        drop(guard);
        assert!(!registry.is_busy(&id));
        assert_eq!(registry.busy_since(&id), None);
        assert!(registry.try_acquire(id).is_some());
    }

    #[test]
    fn row_helpers_embed_address() {
        assert_eq!(TriggerId::rename("10.0.0.7").as_str(), "rename:10.0.0.7");
        assert_eq!(TriggerId::delete("10.0.0.7").to_string(), "delete:10.0.0.7");
    }
}
