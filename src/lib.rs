//! Keyboard-driven WebGL scene: pyramids and terrain quads spun about the
//! vertical axis once per display frame.
//!
//! The core (`SceneLoop` and friends) compiles on every target and talks to
//! the host only through [`GraphicsContext`] and [`FrameScheduler`]. The
//! browser bindings live in `wasm` and are only built for wasm32.

pub mod config;
pub mod error;
pub mod gfx;
pub mod headless;
pub mod input;
pub mod mesh;
pub mod scene;
pub mod scene_loop;
pub mod schedule;
pub mod state;

pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use gfx::GraphicsContext;
pub use input::{KeyAction, KeyBindings};
pub use mesh::MeshKind;
pub use scene::SceneObject;
pub use scene_loop::SceneLoop;
pub use schedule::{FrameHandle, FrameScheduler};
pub use state::{Animation, TransformState};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod frame;
    pub mod gl;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        render::start().map_err(|e| {
            log::error!("{e}");
            JsValue::from_str(&e.to_string())
        })
    }
}
