//! Anchor placement: random columns, grounded on the terrain.

use engine_core::{HeightSampler, MushroomKind};
use rand::Rng;

use crate::attributes::AttributeSynthesizer;
use crate::error::{GenError, Result};
use crate::instance::MushroomInstance;
use crate::noise_field::NoiseSource;

/// An instance that could not be placed because no terrain was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkippedPlacement {
    pub kind: MushroomKind,
    pub x: f32,
    pub z: f32,
}

impl SkippedPlacement {
    pub fn error(&self) -> GenError {
        GenError::NoTerrainIntersection {
            x: self.x,
            z: self.z,
        }
    }
}

/// Query the ground under `(x, z)`, turning a miss into an error.
pub fn ground<H: HeightSampler + ?Sized>(heights: &H, x: f32, z: f32, size: f32) -> Result<f32> {
    heights
        .height_at(x, z, size)
        .ok_or(GenError::NoTerrainIntersection { x, z })
}

/// Anchors in placement order, plus the columns that had no terrain.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    pub anchors: Vec<MushroomInstance>,
    pub skipped: Vec<SkippedPlacement>,
}

/// Build the anchor at `(x, z)`: noise attributes, grounded by `heights`.
pub fn place_anchor<N, H>(
    synth: &AttributeSynthesizer<'_, N>,
    heights: &H,
    x: f32,
    z: f32,
) -> Result<MushroomInstance>
where
    N: NoiseSource + ?Sized,
    H: HeightSampler + ?Sized,
{
    let attributes = synth.attributes(x, z);
    let y = ground(heights, x, z, attributes.size)?;
    Ok(MushroomInstance::from_attributes(x, y, z, &attributes))
}

/// Scatter `count` anchors uniformly over `[0, world_width)^2`.
///
/// Both coordinates are drawn even when the column turns out to have no
/// terrain, so a miss never shifts the positions of later anchors.
pub fn place_anchors<N, H, R>(
    count: u32,
    world_width: f32,
    synth: &AttributeSynthesizer<'_, N>,
    heights: &H,
    rng: &mut R,
) -> AnchorSet
where
    N: NoiseSource + ?Sized,
    H: HeightSampler + ?Sized,
    R: Rng + ?Sized,
{
    let mut set = AnchorSet {
        anchors: Vec::with_capacity(count as usize),
        skipped: Vec::new(),
    };

    for _ in 0..count {
        let x = rng.gen_range(0.0..world_width);
        let z = rng.gen_range(0.0..world_width);
        match place_anchor(synth, heights, x, z) {
            Ok(anchor) => set.anchors.push(anchor),
            Err(e) => {
                log::warn!("Skipping anchor: {}", e);
                set.skipped.push(SkippedPlacement {
                    kind: MushroomKind::Anchor,
                    x,
                    z,
                });
            }
        }
    }

    log::debug!(
        "Placed {} anchors ({} skipped)",
        set.anchors.len(),
        set.skipped.len()
    );
    set
}
