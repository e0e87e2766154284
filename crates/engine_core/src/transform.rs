//! Transform and instance upload data for placed objects.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::color::Rgba;

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Tilted, uniformly scaled transform. Angles are in degrees; yaw is always zero.
    pub fn from_tilt(position: Vec3, tilt_x_deg: f32, tilt_z_deg: f32, scale: f32) -> Self {
        Self {
            position,
            rotation: tilt_quat(tilt_x_deg, tilt_z_deg),
            scale: Vec3::splat(scale),
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Rotation for an (x, 0, z) Euler tilt in degrees, applied Z then X then Y.
pub fn tilt_quat(tilt_x_deg: f32, tilt_z_deg: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        0.0,
        tilt_x_deg.to_radians(),
        tilt_z_deg.to_radians(),
    )
}

/// Raw per-instance data for GPU upload (model matrix + tint).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub fn new(transform: &Transform, color: Rgba) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
            color: color.to_array(),
        }
    }
}
