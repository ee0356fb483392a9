//! Vertex format for exported meshes.

use bytemuck::{Pod, Zeroable};

/// Mesh vertex as uploaded by a render sink.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in 3D space
    pub position: [f32; 3],
}

impl MeshVertex {
    /// Create a new mesh vertex.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

static_assertions::assert_eq_size!(MeshVertex, [f32; 3]);
