//! Terrain heightmap generation from the height noise field.
//!
//! **Layout:** generation evaluates cell `(tx, tz)` at world
//! `(tx / R * W, tz / R * W)`, while the host terrain stretches the committed
//! grid over the whole `[0, W]` square (sample `i` rendered at `i * W / (R - 1)`).
//! Lookups (`world_fraction_at`, `GridHeightLookup`) follow the rendered layout
//! so they agree with what a ray cast against the terrain would hit.

use engine_core::HeightSampler;

use crate::attributes::AttributeSynthesizer;
use crate::noise_field::NoiseSource;

/// Square grid of heights in 0-1, row-major by `tz`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    resolution: usize,
    world_width: f32,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Fill a `resolution x resolution` grid from the height noise field.
    pub fn generate<N: NoiseSource + ?Sized>(
        resolution: u32,
        world_width: f32,
        synth: &AttributeSynthesizer<'_, N>,
    ) -> Self {
        let res = resolution as usize;
        let mut heights = Vec::with_capacity(res * res);
        for tz in 0..res {
            for tx in 0..res {
                let world_x = tx as f32 / res as f32 * world_width;
                let world_z = tz as f32 / res as f32 * world_width;
                heights.push(synth.height_fraction(world_x, world_z).clamp(0.0, 1.0));
            }
        }
        log::debug!(
            "Generated {}x{} height grid over {} units",
            res,
            res,
            world_width
        );
        Self {
            resolution: res,
            world_width,
            heights,
        }
    }

    /// Build a grid from existing 0-1 heights (values are clamped).
    /// Returns `None` if `heights` is not `resolution * resolution` long or empty.
    pub fn from_heights(resolution: usize, world_width: f32, heights: Vec<f32>) -> Option<Self> {
        if resolution == 0 || heights.len() != resolution * resolution {
            return None;
        }
        Some(Self {
            resolution,
            world_width,
            heights: heights.into_iter().map(|h| h.clamp(0.0, 1.0)).collect(),
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn world_width(&self) -> f32 {
        self.world_width
    }

    /// Raw 0-1 heights, row-major by `tz`.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height fraction of cell `(tx, tz)`.
    pub fn get(&self, tx: usize, tz: usize) -> f32 {
        self.heights[tz * self.resolution + tx]
    }

    /// World heights in `[0, height_max]`.
    pub fn scaled(&self, height_max: f32) -> Vec<f32> {
        self.heights.iter().map(|h| h * height_max).collect()
    }

    /// World distance between neighbouring samples in the rendered terrain.
    pub fn sample_spacing(&self) -> f32 {
        if self.resolution > 1 {
            self.world_width / (self.resolution - 1) as f32
        } else {
            self.world_width
        }
    }

    /// Bilinear height fraction at world `(x, z)`, or `None` outside `[0, W]`.
    pub fn world_fraction_at(&self, x: f32, z: f32) -> Option<f32> {
        let w = self.world_width;
        if !(x.is_finite() && z.is_finite()) || x < 0.0 || z < 0.0 || x > w || z > w {
            return None;
        }
        let res = self.resolution;
        if res == 1 {
            return Some(self.heights[0]);
        }

        let step = self.sample_spacing();
        let gx = x / step;
        let gz = z / step;

        let x0 = (gx.floor() as usize).min(res - 2);
        let z0 = (gz.floor() as usize).min(res - 2);

        let fx = (gx - x0 as f32).clamp(0.0, 1.0);
        let fz = (gz - z0 as f32).clamp(0.0, 1.0);

        let h00 = self.get(x0, z0);
        let h10 = self.get(x0 + 1, z0);
        let h01 = self.get(x0, z0 + 1);
        let h11 = self.get(x0 + 1, z0 + 1);

        let top = h00 + (h10 - h00) * fx;
        let bottom = h01 + (h11 - h01) * fx;
        Some(top + (bottom - top) * fz)
    }

    /// World height at `(x, z)` in `[0, height_max]`.
    pub fn world_height_at(&self, x: f32, z: f32, height_max: f32) -> Option<f32> {
        self.world_fraction_at(x, z).map(|h| h * height_max)
    }
}

/// Height backend reading the grid directly instead of casting rays.
#[derive(Debug, Clone, Copy)]
pub struct GridHeightLookup<'a> {
    grid: &'a HeightGrid,
    height_max: f32,
    bias: f32,
}

impl<'a> GridHeightLookup<'a> {
    pub fn new(grid: &'a HeightGrid, height_max: f32, bias: f32) -> Self {
        Self {
            grid,
            height_max,
            bias,
        }
    }
}

impl HeightSampler for GridHeightLookup<'_> {
    fn height_at(&self, x: f32, z: f32, size_hint: f32) -> Option<f32> {
        self.grid
            .world_height_at(x, z, self.height_max)
            .map(|h| h + self.bias * size_hint)
    }
}
