//! Raycasting for terrain height queries.

use crate::PhysicsWorld;
use engine_core::{HeightSampler, Vec3};
use procgen::HeightGrid;
use rapier3d::prelude::*;

/// Clearance above the highest possible terrain point where placement rays start.
const RAY_CLEARANCE: f32 = 1.0;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

impl PhysicsWorld {
    /// Cast a ray and return the first hit accepted by `filter`.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, toi)| {
                let point = ray.point_at(toi);
                RaycastHit {
                    collider,
                    distance: toi,
                    point: Vec3::new(point.x, point.y, point.z),
                }
            })
    }
}

/// Height backend that casts a ray straight down onto the committed terrain.
///
/// Result is `hit height + bias * size_hint`, matching how meshes whose pivot
/// sits above their base are lifted clear of the ground.
pub struct TerrainRaycaster {
    world: PhysicsWorld,
    height_max: f32,
    bias: f32,
}

impl TerrainRaycaster {
    /// Build a collision world from `grid`, stretched over `[0, W]^2` and
    /// scaled to `height_max`.
    pub fn new(grid: &HeightGrid, height_max: f32, bias: f32) -> anyhow::Result<Self> {
        if grid.resolution() < 2 {
            anyhow::bail!(
                "ray backend needs a terrain resolution of at least 2, got {}",
                grid.resolution()
            );
        }
        if !(height_max.is_finite() && height_max > 0.0) {
            anyhow::bail!("height_max must be positive, got {}", height_max);
        }

        let mut world = PhysicsWorld::new();
        world.add_terrain_heightfield(
            grid.heights(),
            grid.resolution(),
            grid.world_width(),
            height_max,
        );
        world.update_query_pipeline();
        Ok(Self {
            world,
            height_max,
            bias,
        })
    }

    /// Terrain surface height under `(x, z)`, without the size bias.
    pub fn surface_at(&self, x: f32, z: f32) -> Option<f32> {
        let top = self.height_max + RAY_CLEARANCE;
        let origin = Vec3::new(x, top, z);
        self.world
            .raycast(origin, -Vec3::Y, top + RAY_CLEARANCE, QueryFilter::default())
            .map(|hit| top - hit.distance)
    }
}

impl HeightSampler for TerrainRaycaster {
    fn height_at(&self, x: f32, z: f32, size_hint: f32) -> Option<f32> {
        self.surface_at(x, z).map(|h| h + self.bias * size_hint)
    }
}
