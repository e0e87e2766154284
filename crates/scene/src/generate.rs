//! Runs a field generation pass with the configured height backend.

use anyhow::Result;
use physics::TerrainRaycaster;
use procgen::{FieldGenerator, GridHeightLookup, PerlinSource, SceneDelta};

use crate::config::{HeightBackend, SceneConfig};

/// Terrain first, then anchors and chains grounded by the chosen backend.
pub fn build_field(config: &SceneConfig) -> Result<SceneDelta> {
    let field = &config.field;
    let noise = PerlinSource::new(field.noise_seed);
    let generator = FieldGenerator::new(field, &noise)?;
    log::debug!("Noise offsets: {:?}", generator.offsets());

    let heights = generator.terrain();
    let population = match config.height_backend {
        HeightBackend::Raycast => {
            let caster = TerrainRaycaster::new(&heights, field.height_max, field.height_bias)?;
            generator.populate(&caster)
        }
        HeightBackend::Grid => {
            let lookup = GridHeightLookup::new(&heights, field.height_max, field.height_bias);
            generator.populate(&lookup)
        }
    };

    Ok(SceneDelta::new(heights, population))
}
