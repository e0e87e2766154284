//! Configuration for mushroom field generation.
//!
//! Defaults reproduce the classic field: a 2 km square, 100 anchors each
//! reaching for its 3 nearest neighbours, offspring every 5-10 m.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Closed range used for attribute synthesis and chain spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Blend from `min` to `max`. `t` is clamped to 0-1 and the result never
    /// leaves the span.
    pub fn lerp(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        (self.min + (self.max - self.min) * t).clamp(self.min, self.max)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Output ranges for noise-driven attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeRanges {
    /// Uniform scale factor.
    pub size: Span,
    /// Tilt about X and Z, in degrees.
    pub tilt: Span,
    /// Color alpha.
    pub alpha: Span,
}

impl Default for AttributeRanges {
    fn default() -> Self {
        Self {
            size: Span::new(0.5, 1.5),
            tilt: Span::new(-30.0, 30.0),
            alpha: Span::new(0.75, 1.0),
        }
    }
}

/// How saturation and value are chosen for a mushroom's color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorMode {
    /// Hue comes from noise; saturation and value are fixed.
    /// The saturation/value fields are still sampled but have no effect.
    FixedSaturationValue { saturation: f32, value: f32 },
    /// Hue, saturation and value all come from their noise fields.
    NoiseDriven,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::FixedSaturationValue {
            saturation: 0.5,
            value: 1.0,
        }
    }
}

/// Everything the generator needs for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Seed for the run's RNG (noise offsets, anchor positions, chain spacing).
    pub seed: u64,
    /// Seed for the shared Perlin permutation table.
    pub noise_seed: u32,
    /// Side length of the square world, in world units.
    pub world_width: f32,
    /// Height samples per side of the terrain grid.
    pub resolution: u32,
    /// World height of a grid value of 1.0.
    pub height_max: f32,
    /// Vertical lift per unit of object size (mesh pivots sit above the base).
    pub height_bias: f32,
    /// Noise frequency across the whole world (higher = noisier).
    pub perlin_scale: f32,
    /// Number of randomly scattered anchors.
    pub anchor_count: u32,
    /// Max chains started from each anchor.
    pub line_count: u32,
    /// Spacing between consecutive offspring along a chain.
    pub line_density: Span,
    pub ranges: AttributeRanges,
    pub color_mode: ColorMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            noise_seed: 0,
            world_width: 2000.0,
            resolution: 513,
            height_max: 50.0,
            height_bias: 1.0,
            perlin_scale: 10.0,
            anchor_count: 100,
            line_count: 3,
            line_density: Span::new(5.0, 10.0),
            ranges: AttributeRanges::default(),
            color_mode: ColorMode::default(),
        }
    }
}

impl FieldConfig {
    /// Reject configurations that cannot produce a field.
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: String) -> Result<()> {
            Err(GenError::InvalidConfiguration(msg))
        }

        if self.resolution == 0 {
            return invalid("resolution must be positive".into());
        }
        if !(self.world_width.is_finite() && self.world_width > 0.0) {
            return invalid(format!("world_width must be positive, got {}", self.world_width));
        }
        if self.anchor_count == 0 {
            return invalid("anchor_count must be positive".into());
        }
        if !(self.height_max.is_finite() && self.height_max > 0.0) {
            return invalid(format!("height_max must be positive, got {}", self.height_max));
        }
        if !self.height_bias.is_finite() {
            return invalid("height_bias must be finite".into());
        }
        if !(self.perlin_scale.is_finite() && self.perlin_scale > 0.0) {
            return invalid(format!("perlin_scale must be positive, got {}", self.perlin_scale));
        }
        let density = self.line_density;
        if !(density.is_ordered() && density.min > 0.0) {
            return invalid(format!(
                "line_density must satisfy 0 < min <= max, got {}..{}",
                density.min, density.max
            ));
        }
        for (name, span) in [
            ("size", self.ranges.size),
            ("tilt", self.ranges.tilt),
            ("alpha", self.ranges.alpha),
        ] {
            if !span.is_ordered() {
                return invalid(format!("{} range is inverted: {}..{}", name, span.min, span.max));
            }
        }
        if let ColorMode::FixedSaturationValue { saturation, value } = self.color_mode {
            if !(0.0..=1.0).contains(&saturation) || !(0.0..=1.0).contains(&value) {
                return invalid("fixed saturation/value must lie in 0-1".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_resolution_rejected() {
        let config = FieldConfig {
            resolution: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidConfiguration(_))));
    }

    #[test]
    fn non_positive_world_width_rejected() {
        for w in [0.0, -5.0, f32::NAN] {
            let config = FieldConfig {
                world_width: w,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "world_width {} accepted", w);
        }
    }

    #[test]
    fn zero_anchor_count_rejected() {
        let config = FieldConfig {
            anchor_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_line_density_rejected() {
        let inverted = FieldConfig {
            line_density: Span::new(10.0, 5.0),
            ..Default::default()
        };
        let zero = FieldConfig {
            line_density: Span::new(0.0, 5.0),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        assert!(zero.validate().is_err());
    }

    #[test]
    fn degenerate_line_density_allowed() {
        let config = FieldConfig {
            line_density: Span::new(7.0, 7.0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn span_lerp_stays_inside() {
        let span = Span::new(-30.0, 30.0);
        assert_eq!(span.lerp(0.0), -30.0);
        assert_eq!(span.lerp(0.5), 0.0);
        assert_eq!(span.lerp(2.0), 30.0);
        assert_eq!(span.lerp(-1.0), -30.0);
    }
}
