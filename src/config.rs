use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gfx::Rgba;
use crate::input::KeyBindings;
use crate::scene::{default_objects, SceneObject};
use crate::state::Steps;

/// Everything needed to build a scene loop. Missing fields take defaults,
/// so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// DOM id of the target canvas.
    pub canvas_id: String,
    pub camera: Vec3,
    pub rotation_speed: f32,
    pub move_step: f32,
    pub speed_step: f32,
    /// Start with animation running.
    pub animate: bool,
    pub clear_color: Rgba,
    pub fill_color: Rgba,
    pub keys: KeyBindings,
    pub objects: Vec<SceneObject>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: "glCanvas".into(),
            camera: Vec3::new(0.0, 0.0, -5.0),
            rotation_speed: 0.01,
            move_step: 0.1,
            speed_step: 0.001,
            animate: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            fill_color: [1.0, 1.0, 1.0, 1.0],
            keys: KeyBindings::default(),
            objects: default_objects(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn steps(&self) -> Steps {
        Steps {
            movement: self.move_step,
            speed: self.speed_step,
        }
    }
}
