use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::MeshKind;

/// A drawable entity. Immutable once built; a scene is an ordered list of
/// these and list order is draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneObject {
    Pyramid {
        position: Vec3,
    },
    Terrain {
        position: Vec3,
        size: f32,
    },
    /// Any kind this build does not know how to draw.
    #[serde(other)]
    Unknown,
}

impl SceneObject {
    pub fn pyramid(position: Vec3) -> Self {
        SceneObject::Pyramid { position }
    }

    pub fn terrain(position: Vec3, size: f32) -> Self {
        SceneObject::Terrain { position, size }
    }

    pub fn mesh_kind(&self) -> Option<MeshKind> {
        match self {
            SceneObject::Pyramid { .. } => Some(MeshKind::Pyramid),
            SceneObject::Terrain { .. } => Some(MeshKind::Terrain),
            SceneObject::Unknown => None,
        }
    }

    /// Object-local placement, applied after the camera transform.
    pub fn placement(&self) -> Mat4 {
        match *self {
            SceneObject::Pyramid { position } => Mat4::from_translation(position),
            SceneObject::Terrain { position, size } => Mat4::from_scale_rotation_translation(
                Vec3::new(size, 1.0, size),
                Quat::IDENTITY,
                position,
            ),
            SceneObject::Unknown => Mat4::IDENTITY,
        }
    }
}

pub fn default_objects() -> Vec<SceneObject> {
    vec![
        SceneObject::pyramid(Vec3::ZERO),
        SceneObject::pyramid(Vec3::new(1.5, 0.0, -1.5)),
        SceneObject::terrain(Vec3::new(0.0, -0.5, 0.0), 5.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_objects() {
        let json = r#"[
            {"kind": "pyramid", "position": [0.0, 0.0, 0.0]},
            {"kind": "terrain", "position": [2.0, 0.0, 0.0], "size": 2.0},
            {"kind": "sphere", "position": [1.0, 1.0, 1.0]}
        ]"#;
        let objects: Vec<SceneObject> = serde_json::from_str(json).unwrap();
        assert_eq!(
            objects,
            vec![
                SceneObject::pyramid(Vec3::ZERO),
                SceneObject::terrain(Vec3::new(2.0, 0.0, 0.0), 2.0),
                SceneObject::Unknown,
            ]
        );
    }

    #[test]
    fn terrain_placement_scales_ground_plane() {
        let terrain = SceneObject::terrain(Vec3::new(2.0, 0.0, 0.0), 2.0);
        let corner = terrain.placement().transform_point3(Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(corner, Vec3::new(3.0, 0.0, 1.0));
    }

    #[test]
    fn unknown_has_no_mesh() {
        assert_eq!(SceneObject::Unknown.mesh_kind(), None);
        assert_eq!(
            SceneObject::pyramid(Vec3::ONE).mesh_kind(),
            Some(MeshKind::Pyramid)
        );
    }
}
