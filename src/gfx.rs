//! Drawing-surface abstraction consumed by the scene loop.
//!
//! Backends (WebGL2 in the browser, the headless recorder on the host)
//! implement [`GraphicsContext`]. The loop never talks to a graphics API
//! directly.

use std::f32::consts::FRAC_PI_4;

use glam::Mat4;

use crate::error::Result;
use crate::mesh::MeshKind;

pub const FIELD_OF_VIEW: f32 = FRAC_PI_4;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const POSITION_ATTRIBUTE: &str = "aVertexPosition";
pub const PROJECTION_UNIFORM: &str = "uProjectionMatrix";
pub const MODEL_VIEW_UNIFORM: &str = "uModelViewMatrix";
pub const COLOR_UNIFORM: &str = "uColor";

pub const VERTEX_SHADER: &str = r#"
    attribute vec4 aVertexPosition;

    uniform mat4 uModelViewMatrix;
    uniform mat4 uProjectionMatrix;

    void main() {
        gl_Position = uProjectionMatrix * uModelViewMatrix * aVertexPosition;
    }
"#;

pub const FRAGMENT_SHADER: &str = r#"
    precision mediump float;

    uniform vec4 uColor;

    void main() {
        gl_FragColor = uColor;
    }
"#;

pub type Rgba = [f32; 4];

/// Host graphics capability: programs, static buffers, matrix uniforms and
/// a triangle-list draw.
///
/// Creation calls can fail and are only made during setup. Per-frame calls
/// are infallible; the binding is assumed valid once the loop runs.
pub trait GraphicsContext {
    type Program;
    type Buffer;

    fn create_program(&mut self, vertex_src: &str, fragment_src: &str) -> Result<Self::Program>;

    /// Uploads a flat table of xyz triples into a static buffer.
    fn create_buffer(&mut self, kind: MeshKind, positions: &[f32]) -> Result<Self::Buffer>;

    /// Drawing-surface size in pixels.
    fn surface_size(&self) -> (u32, u32);

    fn clear(&mut self, color: Rgba);

    fn use_program(&mut self, program: &Self::Program, fill: Rgba);

    fn bind_positions(&mut self, program: &Self::Program, buffer: &Self::Buffer);

    fn set_matrices(&mut self, program: &Self::Program, projection: &Mat4, model_view: &Mat4);

    fn draw_triangles(&mut self, vertex_count: usize);
}

/// Width over height, 1.0 for a degenerate surface.
pub fn aspect_ratio((width, height): (u32, u32)) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FIELD_OF_VIEW, aspect, Z_NEAR, Z_FAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_zero_height_is_one() {
        assert_eq!(aspect_ratio((640, 0)), 1.0);
        assert_eq!(aspect_ratio((640, 320)), 2.0);
    }

    #[test]
    fn shaders_reference_bound_names() {
        assert!(VERTEX_SHADER.contains(POSITION_ATTRIBUTE));
        assert!(VERTEX_SHADER.contains(PROJECTION_UNIFORM));
        assert!(VERTEX_SHADER.contains(MODEL_VIEW_UNIFORM));
        assert!(FRAGMENT_SHADER.contains(COLOR_UNIFORM));
    }
}
