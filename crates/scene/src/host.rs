//! ECS-backed host scene receiving generated fields.

use engine_core::{InstanceRaw, MeshInstance, Mushroom, MushroomKind, Tint, Transform};
use hecs::{Entity, World};
use procgen::{HeightGrid, MushroomInstance, SceneHost};

/// Terrain heights as committed to the renderer, in world units.
#[derive(Debug, Clone)]
pub struct TerrainHeights {
    pub resolution: usize,
    pub size: f32,
    pub heights: Vec<f32>,
}

/// Scene graph for a generated field: one entity per mushroom.
pub struct EcsScene {
    pub world: World,
    pub terrain: Option<TerrainHeights>,
    height_max: f32,
    mesh: MeshInstance,
}

impl EcsScene {
    pub fn new(height_max: f32, mesh: MeshInstance) -> Self {
        Self {
            world: World::new(),
            terrain: None,
            height_max,
            mesh,
        }
    }

    pub fn count(&self, kind: MushroomKind) -> usize {
        self.world
            .query::<&Mushroom>()
            .iter()
            .filter(|(_, m)| m.kind == kind)
            .count()
    }

    /// Per-instance upload data for every mushroom entity.
    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.world
            .query::<(&Transform, &Tint)>()
            .iter()
            .map(|(_, (transform, tint))| InstanceRaw::new(transform, tint.0))
            .collect()
    }

    /// Instance data as raw bytes, ready for a vertex buffer.
    pub fn instance_bytes(&self) -> Vec<u8> {
        let data = self.instance_data();
        bytemuck::cast_slice::<InstanceRaw, u8>(&data).to_vec()
    }
}

impl SceneHost for EcsScene {
    type Handle = Entity;

    fn set_height_field(&mut self, grid: &HeightGrid) {
        self.terrain = Some(TerrainHeights {
            resolution: grid.resolution(),
            size: grid.world_width(),
            heights: grid.scaled(self.height_max),
        });
    }

    fn instantiate(&mut self, kind: MushroomKind, instance: &MushroomInstance) -> Entity {
        self.world.spawn((
            instance.transform(),
            Mushroom { kind },
            Tint(instance.color),
            self.mesh,
        ))
    }
}
