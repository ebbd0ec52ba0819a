// ── Wire ↔ domain conversion ──
//
// Translates `wizly_api::BulbRecord` into the canonical `Device` and back.
// An unset or blank name falls back to the address; an empty scene label
// is normalized to `None`.

use wizly_api::BulbRecord;

use crate::model::{Device, SceneId};

impl From<BulbRecord> for Device {
    fn from(record: BulbRecord) -> Self {
        let display_name = record
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| record.ip.clone());

        Self {
            address: record.ip,
            display_name,
            state: record.state,
            scene_id: record.scene_id.map(SceneId),
            active_scene: record.scene.filter(|scene| !scene.is_empty()),
        }
    }
}

impl From<&Device> for BulbRecord {
    fn from(device: &Device) -> Self {
        Self {
            ip: device.address.clone(),
            name: Some(device.display_name.clone()),
            state: device.state,
            scene_id: device.scene_id.map(|id| id.0),
            scene: device.active_scene.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, scene: Option<&str>) -> BulbRecord {
        BulbRecord {
            ip: "10.0.0.7".into(),
            name: name.map(String::from),
            state: 1,
            scene_id: Some(27),
            scene: scene.map(String::from),
        }
    }

    #[test]
    fn named_record_keeps_its_name() {
        let device = Device::from(record(Some("Desk"), Some("Forest")));
        assert_eq!(device.display_name, "Desk");
        assert_eq!(device.scene_id, Some(SceneId(27)));
        assert_eq!(device.active_scene.as_deref(), Some("Forest"));
    }

    #[test]
    fn blank_name_falls_back_to_address() {
        assert_eq!(Device::from(record(None, None)).display_name, "10.0.0.7");
        assert_eq!(Device::from(record(Some("  "), None)).display_name, "10.0.0.7");
    }

    #[test]
    fn empty_scene_is_none() {
        assert_eq!(Device::from(record(Some("Desk"), Some(""))).active_scene, None);
    }

    #[test]
    fn device_to_record_carries_every_field() {
        let device = Device::from(record(Some("Desk"), Some("Forest")));
        let back = BulbRecord::from(&device);
        assert_eq!(back, record(Some("Desk"), Some("Forest")));
    }
}
