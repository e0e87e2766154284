//! ECS components attached to entities spawned from a generated field.

use crate::color::Rgba;

/// How an object came to exist in the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MushroomKind {
    /// Randomly scattered endpoint of connector chains.
    #[default]
    Anchor,
    /// Interpolated object along a chain between two anchors.
    Offspring,
}

/// Tag component for mushroom entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mushroom {
    pub kind: MushroomKind,
}

/// Material tint applied to every renderer of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub Rgba);

impl Default for Tint {
    fn default() -> Self {
        Self(Rgba::WHITE)
    }
}

/// Mesh reference component - links entity to a mesh for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshInstance {
    pub mesh_id: u32,
    pub material_id: u32,
}

impl MeshInstance {
    pub fn new(mesh_id: u32, material_id: u32) -> Self {
        Self { mesh_id, material_id }
    }
}
