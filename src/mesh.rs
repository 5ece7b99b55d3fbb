//! Static vertex tables and their uploaded counterparts.

use std::fmt;

use crate::error::Result;
use crate::gfx::GraphicsContext;

/// Four lateral faces meeting at the apex, plus one base triangle.
///
/// The square base is intentionally left half-open: the table is fixed at
/// 5 triangles (15 vertices), so only one of the two base triangles is
/// present. Do not add the second one.
#[rustfmt::skip]
pub const PYRAMID_POSITIONS: [f32; 45] = [
    // Front face
    -0.5, -0.5,  0.5,
     0.5, -0.5,  0.5,
     0.0,  0.5,  0.0,
    // Right face
     0.5, -0.5,  0.5,
     0.5, -0.5, -0.5,
     0.0,  0.5,  0.0,
    // Back face
     0.5, -0.5, -0.5,
    -0.5, -0.5, -0.5,
     0.0,  0.5,  0.0,
    // Left face
    -0.5, -0.5, -0.5,
    -0.5, -0.5,  0.5,
     0.0,  0.5,  0.0,
    // Base
    -0.5, -0.5,  0.5,
     0.5, -0.5, -0.5,
    -0.5, -0.5, -0.5,
];

/// Unit quad in the XZ plane, two triangles.
#[rustfmt::skip]
pub const TERRAIN_POSITIONS: [f32; 18] = [
    -0.5, 0.0, -0.5,
    -0.5, 0.0,  0.5,
     0.5, 0.0,  0.5,

     0.5, 0.0,  0.5,
     0.5, 0.0, -0.5,
    -0.5, 0.0, -0.5,
];

/// The distinct mesh shapes a scene object can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Pyramid,
    Terrain,
}

impl MeshKind {
    pub fn positions(self) -> &'static [f32] {
        match self {
            MeshKind::Pyramid => &PYRAMID_POSITIONS,
            MeshKind::Terrain => &TERRAIN_POSITIONS,
        }
    }

    pub fn vertex_count(self) -> usize {
        self.positions().len() / 3
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshKind::Pyramid => f.write_str("pyramid"),
            MeshKind::Terrain => f.write_str("terrain"),
        }
    }
}

/// A vertex table living in a GPU buffer.
#[derive(Debug)]
pub struct GpuMesh<B> {
    pub buffer: B,
    pub vertex_count: usize,
}

/// One uploaded buffer per [`MeshKind`], shared read-only by every draw.
#[derive(Debug)]
pub struct MeshBuffers<B> {
    pyramid: GpuMesh<B>,
    terrain: GpuMesh<B>,
}

impl<B> MeshBuffers<B> {
    pub fn upload<G>(gfx: &mut G) -> Result<Self>
    where
        G: GraphicsContext<Buffer = B>,
    {
        Ok(Self {
            pyramid: upload_one(gfx, MeshKind::Pyramid)?,
            terrain: upload_one(gfx, MeshKind::Terrain)?,
        })
    }

    pub fn get(&self, kind: MeshKind) -> &GpuMesh<B> {
        match kind {
            MeshKind::Pyramid => &self.pyramid,
            MeshKind::Terrain => &self.terrain,
        }
    }
}

fn upload_one<G: GraphicsContext>(gfx: &mut G, kind: MeshKind) -> Result<GpuMesh<G::Buffer>> {
    let buffer = gfx.create_buffer(kind, kind.positions())?;
    Ok(GpuMesh {
        buffer,
        vertex_count: kind.vertex_count(),
    })
}
