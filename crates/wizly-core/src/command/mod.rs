// ── Action API ──
//
// Every state-changing request that returns fresh device records goes
// through the `Action` enum. The controller dispatches it against the
// backend and reconciles whatever comes back by address.

use std::fmt;

use wizly_api::{BulbClient, BulbRecord};

use crate::model::{SceneId, Target};
use crate::trigger::TriggerId;

/// A backend action aimed at one device or at every device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    PowerOn(Target),
    PowerOff(Target),
    ApplyScene(Target, SceneId),
    /// Apply the scene if it is not the active one, otherwise switch off.
    ToggleScene(Target, SceneId),
}

impl Action {
    /// The trigger that identifies this action's control when the caller
    /// does not name one: one per target, verb, and scene.
    pub fn default_trigger(&self) -> TriggerId {
        TriggerId::new(match self {
            Self::PowerOn(target) => format!("on:{target}"),
            Self::PowerOff(target) => format!("off:{target}"),
            Self::ApplyScene(target, scene) => format!("scene:{target}:{scene}"),
            Self::ToggleScene(target, scene) => format!("toggle:{target}:{scene}"),
        })
    }

    /// Path below the backend base URL, for logs.
    pub fn endpoint_path(&self) -> String {
        match self {
            Self::PowerOn(target) => format!("/wiz/on/{target}"),
            Self::PowerOff(target) => format!("/wiz/off/{target}"),
            Self::ApplyScene(target, scene) => format!("/wiz/scene/{target}/{scene}"),
            Self::ToggleScene(target, scene) => format!("/wiz/toggle/{target}/{scene}"),
        }
    }

    pub(crate) async fn dispatch(
        &self,
        client: &BulbClient,
    ) -> Result<Vec<BulbRecord>, wizly_api::Error> {
        match self {
            Self::PowerOn(target) => client.power_on(target.as_path()).await,
            Self::PowerOff(target) => client.power_off(target.as_path()).await,
            Self::ApplyScene(target, scene) => client.apply_scene(target.as_path(), scene.0).await,
            Self::ToggleScene(target, scene) => {
                client.toggle_scene(target.as_path(), scene.0).await
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.endpoint_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_triggers_distinguish_target_and_verb() {
        let row = Target::from("10.0.0.7");
        assert_eq!(Action::PowerOn(row.clone()).default_trigger().as_str(), "on:10.0.0.7");
        assert_eq!(Action::PowerOff(Target::All).default_trigger().as_str(), "off:all");
        assert_eq!(
            Action::ApplyScene(row, SceneId(27)).default_trigger().as_str(),
            "scene:10.0.0.7:27"
        );
    }

    #[test]
    fn display_is_endpoint_path() {
        let action = Action::ToggleScene(Target::All, SceneId(4));
        assert_eq!(action.to_string(), "/wiz/toggle/all/4");
    }
}
