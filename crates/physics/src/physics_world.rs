//! Static collision world holding the committed terrain.

use rapier3d::na::DMatrix;
use rapier3d::prelude::*;

/// Collider sets plus the query pipeline used for placement rays.
///
/// Nothing here is simulated; the world only answers queries.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Update query pipeline for raycasting. Call after adding colliders.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a heightfield collider covering `[0, size] x [0, size]` in X and Z.
    /// - `heights`: row-major by z (index = z * resolution + x), values in 0-1.
    /// - `height_scale`: world Y of a height of 1.0.
    pub fn add_terrain_heightfield(
        &mut self,
        heights: &[f32],
        resolution: usize,
        size: f32,
        height_scale: f32,
    ) -> ColliderHandle {
        assert!(
            resolution >= 2,
            "Terrain heightfield must have at least 2 rows and columns"
        );
        assert!(
            heights.len() >= resolution * resolution,
            "Heights slice too small for {}x{} grid",
            resolution,
            resolution
        );

        let heights_matrix =
            DMatrix::from_fn(resolution, resolution, |i, j| heights[i * resolution + j] as Real);
        let scale = vector![size, height_scale, size];

        // Heightfields are centered on their origin; shift so the corner sits at (0, 0).
        let collider = ColliderBuilder::heightfield(heights_matrix, scale)
            .translation(vector![size * 0.5, 0.0, size * 0.5])
            .build();
        log::debug!(
            "Added {}x{} terrain heightfield ({} x {} units)",
            resolution,
            resolution,
            size,
            height_scale
        );
        self.collider_set.insert(collider)
    }
}
