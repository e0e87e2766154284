//! Noise fields: one shared 2D noise function, many independent attributes.
//!
//! Every attribute (height, size, hue, ...) samples the same noise function,
//! shifted by its own random offset, so attributes never correlate while each
//! one stays a pure function of world `(x, z)`.

use noise::{NoiseFn, Perlin};
use rand::Rng;

/// Largest `f32` strictly below 1.0.
const MAX_SAMPLE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Deterministic 2D noise with output in `[0, 1)`.
pub trait NoiseSource {
    fn sample(&self, x: f64, z: f64) -> f32;
}

/// Perlin noise remapped from `[-1, 1]` to `[0, 1)`.
#[derive(Debug, Clone)]
pub struct PerlinSource {
    perlin: Perlin,
}

impl PerlinSource {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Default for PerlinSource {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseSource for PerlinSource {
    fn sample(&self, x: f64, z: f64) -> f32 {
        let v = (self.perlin.get([x, z]) + 1.0) * 0.5;
        (v as f32).clamp(0.0, MAX_SAMPLE)
    }
}

/// The attribute a noise field drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Height,
    Size,
    Hue,
    Saturation,
    Value,
    Alpha,
    TiltX,
    TiltZ,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Height,
        FieldKind::Size,
        FieldKind::Hue,
        FieldKind::Saturation,
        FieldKind::Value,
        FieldKind::Alpha,
        FieldKind::TiltX,
        FieldKind::TiltZ,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Height => "height",
            FieldKind::Size => "size",
            FieldKind::Hue => "hue",
            FieldKind::Saturation => "saturation",
            FieldKind::Value => "value",
            FieldKind::Alpha => "alpha",
            FieldKind::TiltX => "tilt_x",
            FieldKind::TiltZ => "tilt_z",
        }
    }
}

/// Per-field offsets, drawn once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseOffsets {
    pub height: f32,
    pub size: f32,
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
    pub alpha: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
}

impl NoiseOffsets {
    /// Draw one uniform 0-1 offset per field, in `FieldKind::ALL` order.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            height: rng.gen(),
            size: rng.gen(),
            hue: rng.gen(),
            saturation: rng.gen(),
            value: rng.gen(),
            alpha: rng.gen(),
            tilt_x: rng.gen(),
            tilt_z: rng.gen(),
        }
    }

    pub fn get(&self, field: FieldKind) -> f32 {
        match field {
            FieldKind::Height => self.height,
            FieldKind::Size => self.size,
            FieldKind::Hue => self.hue,
            FieldKind::Saturation => self.saturation,
            FieldKind::Value => self.value,
            FieldKind::Alpha => self.alpha,
            FieldKind::TiltX => self.tilt_x,
            FieldKind::TiltZ => self.tilt_z,
        }
    }
}

/// A noise source bound to a world size, frequency and the run's offsets.
pub struct NoiseBank<'a, N: NoiseSource + ?Sized> {
    source: &'a N,
    offsets: NoiseOffsets,
    world_width: f64,
    scale: f64,
}

impl<'a, N: NoiseSource + ?Sized> NoiseBank<'a, N> {
    pub fn new(source: &'a N, offsets: NoiseOffsets, world_width: f32, scale: f32) -> Self {
        Self {
            source,
            offsets,
            world_width: world_width as f64,
            scale: scale as f64,
        }
    }

    pub fn offsets(&self) -> &NoiseOffsets {
        &self.offsets
    }

    /// Sample `field` at world `(x, z)`. Result is in `[0, 1)`.
    pub fn sample(&self, field: FieldKind, x: f32, z: f32) -> f32 {
        let offset = self.offsets.get(field) as f64;
        let nx = (x as f64 / self.world_width + offset) * self.scale;
        let nz = (z as f64 / self.world_width + offset) * self.scale;
        self.source.sample(nx, nz)
    }
}
