//! Core value types shared by the mushroom field crates.
//!
//! This crate provides the foundational types used across the workspace:
//! - Transform and instance upload data
//! - RGBA color with HSV conversion
//! - ECS components for the host scene
//! - The terrain height query implemented by the height backends

pub mod color;
pub mod components;
pub mod height;
pub mod transform;

pub use color::*;
pub use components::*;
pub use height::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
