//! Read-only view of engine state for displays and logs

use serde::{Deserialize, Serialize};
use tessera_input::{OrientationState, RotationAxis};

use crate::composer::Platform;
use crate::projection::ProjectionParams;

/// Engine state at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Engine time in seconds
    pub time: f32,
    pub platform: Platform,
    pub active: bool,
    pub axes: Vec<RotationAxis>,
    pub params: ProjectionParams,
    pub orientation: OrientationState,
    pub touch_enabled: bool,
}

impl EngineSnapshot {
    /// Single-line form for a title bar. Disabled axes show as `-`.
    pub fn summary(&self) -> String {
        let axes: Vec<String> = self
            .axes
            .iter()
            .map(|a| {
                if a.enabled {
                    format!("{} {:.2}", a.id, a.angle)
                } else {
                    format!("{} -", a.id)
                }
            })
            .collect();
        format!(
            "{} | fov {:.0} persp {:.1} camZ {:.1} | orientation {} | touch {}{}",
            axes.join(" "),
            self.params.fov_degrees,
            self.params.perspective_strength,
            self.params.camera_z,
            self.orientation,
            if self.touch_enabled { "on" } else { "off" },
            if self.active { "" } else { " | paused" },
        )
    }

    /// Pretty RON for logging
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new().struct_names(true))
    }
}
