//! Scene configuration. Loaded from scene.ron at startup.

use procgen::FieldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where placement height queries are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightBackend {
    /// Cast rays down onto the committed terrain collider.
    #[default]
    Raycast,
    /// Read the generated grid directly.
    Grid,
}

/// Persistent scene settings. Loaded from `scene.ron` in the current directory
/// unless a path is given on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub height_backend: HeightBackend,
    /// Mesh id handed to the renderer for every mushroom.
    #[serde(default)]
    pub mushroom_mesh: u32,
    /// Material id handed to the renderer for every mushroom.
    #[serde(default)]
    pub mushroom_material: u32,
}

impl SceneConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::parse(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        } else {
            log::info!("No config at {:?}, using defaults", path);
        }
        Self::default()
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("scene.ron")
}
