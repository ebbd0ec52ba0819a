// ── Device domain types ──

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Literal address token meaning "every known device".
pub const BROADCAST: &str = wizly_api::BROADCAST_ADDRESS;

/// Coarse power state derived from the signed `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PowerState {
    Unreachable,
    Off,
    On,
}

/// The canonical Device type.
///
/// `state` keeps the backend's signed encoding: negative = unreachable,
/// zero = reachable but off, positive = on (the magnitude may carry the
/// power level). `active_scene` only means something while on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub address: String,
    pub display_name: String,
    pub state: i32,
    pub scene_id: Option<SceneId>,
    pub active_scene: Option<String>,
}

impl Device {
    /// A freshly discovered device: named after its address, switched off.
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            display_name: address.clone(),
            address,
            state: 0,
            scene_id: None,
            active_scene: None,
        }
    }

    pub fn power_state(&self) -> PowerState {
        match self.state {
            s if s < 0 => PowerState::Unreachable,
            0 => PowerState::Off,
            _ => PowerState::On,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.state < 0
    }

    pub fn is_on(&self) -> bool {
        self.state > 0
    }

    pub fn is_off(&self) -> bool {
        self.state == 0
    }

    /// True when the user gave the device a name other than its address.
    pub fn has_custom_name(&self) -> bool {
        self.display_name != self.address
    }

    /// The active scene label, hidden unless the device is on.
    pub fn visible_scene(&self) -> Option<&str> {
        if self.is_on() {
            self.active_scene.as_deref()
        } else {
            None
        }
    }
}

// ── Target ───────────────────────────────────────────────────────────

/// Who an action is aimed at: one address, or the broadcast token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    All,
    Address(String),
}

impl Target {
    /// The path segment sent to the backend.
    pub fn as_path(&self) -> &str {
        match self {
            Self::All => BROADCAST,
            Self::Address(address) => address,
        }
    }
}

impl From<&str> for Target {
    fn from(raw: &str) -> Self {
        if raw == BROADCAST {
            Self::All
        } else {
            Self::Address(raw.to_owned())
        }
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Self {
        if raw == BROADCAST {
            Self::All
        } else {
            Self::Address(raw)
        }
    }
}

impl From<&Device> for Target {
    fn from(device: &Device) -> Self {
        Self::Address(device.address.clone())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

// ── Scenes ───────────────────────────────────────────────────────────

/// Opaque integer scene code. Passed through to the backend unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub i32);

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Scene> for SceneId {
    fn from(scene: Scene) -> Self {
        scene.id()
    }
}

/// Accepts a scene name (`forest`, `warm-white`) or a raw integer code.
impl FromStr for SceneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(scene) = Scene::from_str(s) {
            return Ok(scene.id());
        }
        s.trim()
            .parse::<i32>()
            .map(SceneId)
            .map_err(|_| format!("unknown scene '{s}' (expected a scene name or an integer code)"))
    }
}

/// Scenes offered by the reference control surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Scene {
    Recycle,
    Forest,
    Fireplace,
    WarmWhite,
    Daylight,
    CoolWhite,
}

impl Scene {
    pub fn id(self) -> SceneId {
        SceneId(match self {
            Self::Recycle => 4,
            Self::Forest => 27,
            Self::Fireplace => 5,
            Self::WarmWhite => 11,
            Self::Daylight => 12,
            Self::CoolWhite => 14,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn power_state_follows_sign() {
        let mut d = Device::new("10.0.0.7");
        assert_eq!(d.power_state(), PowerState::Off);
        assert!(d.is_off());
        d.state = -1;
        assert_eq!(d.power_state(), PowerState::Unreachable);
        d.state = 128;
        assert_eq!(d.power_state(), PowerState::On);
    }

    #[test]
    fn scene_hidden_while_off() {
        let mut d = Device::new("10.0.0.7");
        d.active_scene = Some("Forest".into());
        assert_eq!(d.visible_scene(), None);
        d.state = 1;
        assert_eq!(d.visible_scene(), Some("Forest"));
    }

    #[test]
    fn broadcast_token_parses_to_all() {
        assert_eq!(Target::from("all"), Target::All);
        assert_eq!(Target::from("10.0.0.7"), Target::Address("10.0.0.7".into()));
        assert_eq!(Target::All.to_string(), "all");
    }

    #[test]
    fn scene_ids_match_reference_codes() {
        let codes: Vec<i32> = Scene::iter().map(|s| s.id().0).collect();
        assert_eq!(codes, vec![4, 27, 5, 11, 12, 14]);
    }

    #[test]
    fn scene_id_parses_names_and_integers() {
        assert_eq!("warm-white".parse::<SceneId>().unwrap(), SceneId(11));
        assert_eq!("Forest".parse::<SceneId>().unwrap(), SceneId(27));
        assert_eq!("42".parse::<SceneId>().unwrap(), SceneId(42));
        assert!("disco".parse::<SceneId>().is_err());
    }
}
