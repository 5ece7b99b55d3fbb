use glam::{Mat4, Vec3};

use crate::input::KeyAction;

/// Whether the frame callback keeps re-arming itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Running,
    Paused,
}

impl Animation {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Animation::Running
        } else {
            Animation::Paused
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Animation::Running => Animation::Paused,
            Animation::Paused => Animation::Running,
        }
    }

    pub fn is_running(self) -> bool {
        self == Animation::Running
    }
}

/// Step sizes applied per key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub movement: f32,
    pub speed: f32,
}

/// Camera and rotation state mutated by key presses and animated frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub camera_position: Vec3,
    /// Radians, accumulated without wraparound.
    pub rotation_angle: f32,
    /// Radians per animated frame.
    pub rotation_speed: f32,
}

impl TransformState {
    pub fn new(camera_position: Vec3, rotation_speed: f32) -> Self {
        Self {
            camera_position,
            rotation_angle: 0.0,
            rotation_speed,
        }
    }

    /// Applies the camera/speed part of a key action. Returns whether
    /// anything changed; `ToggleAnimation` never touches the transform.
    pub fn apply(&mut self, action: KeyAction, steps: Steps) -> bool {
        match action {
            KeyAction::MoveUp => self.camera_position.y += steps.movement,
            KeyAction::MoveDown => self.camera_position.y -= steps.movement,
            KeyAction::MoveLeft => self.camera_position.x -= steps.movement,
            KeyAction::MoveRight => self.camera_position.x += steps.movement,
            KeyAction::SpeedUp => self.rotation_speed += steps.speed,
            KeyAction::SlowDown => self.rotation_speed -= steps.speed,
            KeyAction::ToggleAnimation => return false,
        }
        true
    }

    pub fn advance(&mut self) {
        self.rotation_angle += self.rotation_speed;
    }

    /// Translate by the camera position, then spin about +Y.
    pub fn model_view(&self) -> Mat4 {
        Mat4::from_translation(self.camera_position) * Mat4::from_rotation_y(self.rotation_angle)
    }
}
