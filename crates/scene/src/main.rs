//! Mushrooms - generates a noise-driven terrain, scatters mushrooms over it
//! and breeds chains of offspring between neighbouring anchors.

mod config;
mod generate;
mod host;

use anyhow::Result;
use engine_core::{MeshInstance, MushroomKind};
use std::path::PathBuf;

use config::{default_config_path, SceneConfig};
use generate::build_field;
use host::EcsScene;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let config = SceneConfig::load(&path);

    log::info!(
        "Generating field: {} anchors over {}x{} units, {:?} height backend",
        config.field.anchor_count,
        config.field.world_width,
        config.field.world_width,
        config.height_backend
    );

    let delta = build_field(&config)?;

    let mut scene = EcsScene::new(
        config.field.height_max,
        MeshInstance::new(config.mushroom_mesh, config.mushroom_material),
    );
    let handles = delta.apply(&mut scene);

    log::info!(
        "Spawned {} entities: {} anchors, {} offspring in {} chains",
        handles.len(),
        scene.count(MushroomKind::Anchor),
        scene.count(MushroomKind::Offspring),
        delta.chains.len()
    );
    if !delta.skipped.is_empty() {
        log::warn!("{} placements had no terrain underneath", delta.skipped.len());
    }
    if let Some(terrain) = &scene.terrain {
        let peak = terrain.heights.iter().copied().fold(0.0_f32, f32::max);
        log::info!(
            "Terrain {}x{} committed over {} units, peak height {:.2}",
            terrain.resolution,
            terrain.resolution,
            terrain.size,
            peak
        );
    }
    log::debug!("Instance buffer: {} bytes", scene.instance_bytes().len());

    Ok(())
}
