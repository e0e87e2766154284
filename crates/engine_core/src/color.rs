//! Linear RGBA color used to tint placed objects.

/// RGBA color, each channel nominally in 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert hue/saturation/value (all 0-1) to an opaque color.
    /// Hue wraps, so 1.0 is the same red as 0.0.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        if saturation <= 0.0 {
            return Self::new(value, value, value, 1.0);
        }

        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * f);
        let t = value * (1.0 - saturation * (1.0 - f));

        let (r, g, b) = match sector as u32 % 6 {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        };
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Per-channel linear interpolation; `t` is not clamped.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-5
            && (a.g - b.g).abs() < 1e-5
            && (a.b - b.b).abs() < 1e-5
            && (a.a - b.a).abs() < 1e-5
    }

    #[test]
    fn hsv_primaries() {
        assert!(close(Rgba::from_hsv(0.0, 1.0, 1.0), Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(Rgba::from_hsv(1.0 / 3.0, 1.0, 1.0), Rgba::new(0.0, 1.0, 0.0, 1.0)));
        assert!(close(Rgba::from_hsv(2.0 / 3.0, 1.0, 1.0), Rgba::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn hsv_half_saturation_red() {
        let c = Rgba::from_hsv(0.0, 0.5, 1.0);
        assert!(close(c, Rgba::new(1.0, 0.5, 0.5, 1.0)));
    }

    #[test]
    fn hsv_zero_saturation_is_grey() {
        assert!(close(Rgba::from_hsv(0.37, 0.0, 0.4), Rgba::new(0.4, 0.4, 0.4, 1.0)));
    }

    #[test]
    fn hue_wraps() {
        assert!(close(Rgba::from_hsv(1.0, 0.8, 0.9), Rgba::from_hsv(0.0, 0.8, 0.9)));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgba::new(0.0, 0.2, 0.4, 1.0);
        let b = Rgba::new(1.0, 0.4, 0.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert!(close(a.lerp(b, 1.0), b));
        assert!(close(a.lerp(b, 0.5), Rgba::new(0.5, 0.3, 0.2, 0.75)));
    }
}
