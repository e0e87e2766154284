//! Placed mushroom values.

use engine_core::{tilt_quat, InstanceRaw, Rgba, Transform};
use glam::{Quat, Vec2, Vec3};

use crate::attributes::Attributes;

/// One placed object. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MushroomInstance {
    pub position: Vec3,
    /// Tilt about X in degrees (yaw is always zero).
    pub tilt_x: f32,
    /// Tilt about Z in degrees.
    pub tilt_z: f32,
    /// Uniform scale factor.
    pub scale: f32,
    pub color: Rgba,
}

impl MushroomInstance {
    pub fn from_attributes(x: f32, y: f32, z: f32, attributes: &Attributes) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            tilt_x: attributes.tilt_x,
            tilt_z: attributes.tilt_z,
            scale: attributes.size,
            color: attributes.color,
        }
    }

    /// Ground-plane position.
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    pub fn rotation(&self) -> Quat {
        tilt_quat(self.tilt_x, self.tilt_z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_tilt(self.position, self.tilt_x, self.tilt_z, self.scale)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw::new(&self.transform(), self.color)
    }

    /// Interpolate every attribute between `start` and `end` by `t`, except
    /// height, which is supplied by the caller from the terrain under the blend.
    /// Tilt blends the Euler angles directly; for tilts within about 30 degrees
    /// and zero yaw this stays close to a quaternion lerp.
    pub fn blend(start: &Self, end: &Self, t: f32, height: f32) -> Self {
        let planar = start.planar().lerp(end.planar(), t);
        Self {
            position: Vec3::new(planar.x, height, planar.y),
            tilt_x: lerp(start.tilt_x, end.tilt_x, t),
            tilt_z: lerp(start.tilt_z, end.tilt_z, t),
            scale: lerp(start.scale, end.scale, t),
            color: start.color.lerp(end.color, t),
        }
    }
}

/// Planar (x, z) position blended between two instances.
pub fn blend_planar(start: &MushroomInstance, end: &MushroomInstance, t: f32) -> Vec2 {
    start.planar().lerp(end.planar(), t)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
