use serde::{Deserialize, Serialize};

/// What a recognised key press asks the scene to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ToggleAnimation,
    SpeedUp,
    SlowDown,
}

/// Key identifiers (as reported by `KeyboardEvent.key`) bound to each action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub toggle_animation: String,
    pub speed_up: String,
    pub slow_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "ArrowUp".into(),
            down: "ArrowDown".into(),
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
            toggle_animation: "p".into(),
            speed_up: "r".into(),
            slow_down: "e".into(),
        }
    }
}

impl KeyBindings {
    /// `None` for keys with no binding.
    pub fn resolve(&self, key: &str) -> Option<KeyAction> {
        let bindings = [
            (&self.up, KeyAction::MoveUp),
            (&self.down, KeyAction::MoveDown),
            (&self.left, KeyAction::MoveLeft),
            (&self.right, KeyAction::MoveRight),
            (&self.toggle_animation, KeyAction::ToggleAnimation),
            (&self.speed_up, KeyAction::SpeedUp),
            (&self.slow_down, KeyAction::SlowDown),
        ];
        bindings
            .into_iter()
            .find(|(bound, _)| bound.as_str() == key)
            .map(|(_, action)| action)
    }
}
