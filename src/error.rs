use std::fmt;

use thiserror::Error;

use crate::mesh::MeshKind;

/// Shader stage, used to tag compile failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors raised while setting up or driving the scene.
///
/// Setup errors are terminal for the loop; nothing is retried.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("error compiling {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("unable to link shader program: {0}")]
    ProgramLink(String),

    #[error("shader program has no attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("shader program has no uniform `{0}`")]
    MissingUniform(&'static str),

    #[error("unable to allocate vertex buffer for {0} mesh")]
    BufferAlloc(MeshKind),

    #[error("unable to schedule frame: {0}")]
    Schedule(String),

    #[error("invalid scene config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage() {
        let err = SceneError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".into(),
        };
        assert_eq!(
            err.to_string(),
            "error compiling fragment shader: 0:1: syntax error"
        );
    }

    #[test]
    fn buffer_error_names_mesh() {
        let err = SceneError::BufferAlloc(MeshKind::Terrain);
        assert!(err.to_string().contains("terrain"));
    }
}
