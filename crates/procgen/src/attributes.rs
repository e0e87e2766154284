//! Attribute synthesis: size, tilt and color as pure functions of `(x, z)`.

use engine_core::Rgba;

use crate::config::{AttributeRanges, ColorMode, Span};
use crate::noise_field::{FieldKind, NoiseBank, NoiseSource};

/// Noise-derived look of an object at a given column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attributes {
    pub size: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub color: Rgba,
}

/// Maps noise fields onto configured attribute ranges.
pub struct AttributeSynthesizer<'a, N: NoiseSource + ?Sized> {
    bank: NoiseBank<'a, N>,
    ranges: AttributeRanges,
    color_mode: ColorMode,
}

impl<'a, N: NoiseSource + ?Sized> AttributeSynthesizer<'a, N> {
    pub fn new(bank: NoiseBank<'a, N>, ranges: AttributeRanges, color_mode: ColorMode) -> Self {
        Self {
            bank,
            ranges,
            color_mode,
        }
    }

    pub fn bank(&self) -> &NoiseBank<'a, N> {
        &self.bank
    }

    /// `lerp(span.min, span.max, noise(field, x, z))`.
    pub fn synthesize(&self, span: Span, field: FieldKind, x: f32, z: f32) -> f32 {
        span.lerp(self.bank.sample(field, x, z))
    }

    /// Terrain height fraction in 0-1.
    pub fn height_fraction(&self, x: f32, z: f32) -> f32 {
        self.synthesize(Span::new(0.0, 1.0), FieldKind::Height, x, z)
    }

    pub fn size(&self, x: f32, z: f32) -> f32 {
        self.synthesize(self.ranges.size, FieldKind::Size, x, z)
    }

    /// (x, z) tilt in degrees.
    pub fn tilt(&self, x: f32, z: f32) -> (f32, f32) {
        (
            self.synthesize(self.ranges.tilt, FieldKind::TiltX, x, z),
            self.synthesize(self.ranges.tilt, FieldKind::TiltZ, x, z),
        )
    }

    pub fn color(&self, x: f32, z: f32) -> Rgba {
        let hue = self.bank.sample(FieldKind::Hue, x, z);
        let saturation = self.bank.sample(FieldKind::Saturation, x, z);
        let value = self.bank.sample(FieldKind::Value, x, z);
        let alpha = self.synthesize(self.ranges.alpha, FieldKind::Alpha, x, z);

        let color = match self.color_mode {
            ColorMode::FixedSaturationValue { saturation, value } => {
                Rgba::from_hsv(hue, saturation, value)
            }
            ColorMode::NoiseDriven => Rgba::from_hsv(hue, saturation, value),
        };
        color.with_alpha(alpha)
    }

    pub fn attributes(&self, x: f32, z: f32) -> Attributes {
        let (tilt_x, tilt_z) = self.tilt(x, z);
        Attributes {
            size: self.size(x, z),
            tilt_x,
            tilt_z,
            color: self.color(x, z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::{NoiseOffsets, PerlinSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Noise that returns a fixed value everywhere.
    struct Constant(f32);

    impl NoiseSource for Constant {
        fn sample(&self, _x: f64, _z: f64) -> f32 {
            self.0
        }
    }

    fn grid_points() -> impl Iterator<Item = (f32, f32)> {
        (0..40).flat_map(|i| (0..40).map(move |j| (i as f32 * 49.7, j as f32 * 51.3)))
    }

    #[test]
    fn attributes_stay_in_range() {
        let source = PerlinSource::new(3);
        let offsets = NoiseOffsets::draw(&mut StdRng::seed_from_u64(11));
        let ranges = AttributeRanges::default();
        let synth = AttributeSynthesizer::new(
            NoiseBank::new(&source, offsets, 2000.0, 10.0),
            ranges,
            ColorMode::NoiseDriven,
        );
        for (x, z) in grid_points() {
            let a = synth.attributes(x, z);
            assert!(ranges.size.contains(a.size));
            assert!(ranges.tilt.contains(a.tilt_x));
            assert!(ranges.tilt.contains(a.tilt_z));
            assert!(ranges.alpha.contains(a.color.a));
            for c in [a.color.r, a.color.g, a.color.b] {
                assert!((0.0..=1.0).contains(&c));
            }
            let h = synth.height_fraction(x, z);
            assert!((0.0..=1.0).contains(&h));
        }
    }

    #[test]
    fn same_column_same_attributes() {
        let source = PerlinSource::new(3);
        let offsets = NoiseOffsets::draw(&mut StdRng::seed_from_u64(2));
        let synth = AttributeSynthesizer::new(
            NoiseBank::new(&source, offsets, 2000.0, 10.0),
            AttributeRanges::default(),
            ColorMode::default(),
        );
        assert_eq!(synth.attributes(812.5, 44.25), synth.attributes(812.5, 44.25));
    }

    #[test]
    fn constant_noise_hits_exact_blend() {
        let source = Constant(0.5);
        let synth = AttributeSynthesizer::new(
            NoiseBank::new(&source, NoiseOffsets::default(), 200.0, 10.0),
            AttributeRanges::default(),
            ColorMode::default(),
        );
        let a = synth.attributes(10.0, 10.0);
        assert_eq!(a.size, 1.0);
        assert_eq!(a.tilt_x, 0.0);
        assert_eq!(a.tilt_z, 0.0);
        assert_eq!(a.color.a, 0.875);
    }

    #[test]
    fn fixed_mode_ignores_saturation_and_value_fields() {
        let source = Constant(0.0);
        let synth = AttributeSynthesizer::new(
            NoiseBank::new(&source, NoiseOffsets::default(), 200.0, 10.0),
            AttributeRanges::default(),
            ColorMode::default(),
        );
        // Hue 0 at S=0.5, V=1 is a pale red.
        let c = synth.color(5.0, 5.0);
        assert_eq!((c.r, c.g, c.b), (1.0, 0.5, 0.5));
    }

    #[test]
    fn noise_driven_mode_applies_saturation_and_value_fields() {
        let source = Constant(0.0);
        let synth = AttributeSynthesizer::new(
            NoiseBank::new(&source, NoiseOffsets::default(), 200.0, 10.0),
            AttributeRanges::default(),
            ColorMode::NoiseDriven,
        );
        // S=0, V=0 collapses to black.
        let c = synth.color(5.0, 5.0);
        assert_eq!((c.r, c.g, c.b), (0.0, 0.0, 0.0));
        assert_eq!(c.a, 0.75);
    }
}
