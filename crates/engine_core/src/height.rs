//! Terrain height queries.

/// Answers "where is the ground under this column?" for object placement.
///
/// Backends are free to bias the returned height by `size_hint` (e.g. to lift
/// a mesh whose pivot is not at its base). `None` means no terrain was found
/// under `(x, z)`.
pub trait HeightSampler {
    fn height_at(&self, x: f32, z: f32, size_hint: f32) -> Option<f32>;
}

impl<T: HeightSampler + ?Sized> HeightSampler for &T {
    fn height_at(&self, x: f32, z: f32, size_hint: f32) -> Option<f32> {
        (**self).height_at(x, z, size_hint)
    }
}

impl<T: HeightSampler + ?Sized> HeightSampler for Box<T> {
    fn height_at(&self, x: f32, z: f32, size_hint: f32) -> Option<f32> {
        (**self).height_at(x, z, size_hint)
    }
}

/// Flat ground at a constant height, ignoring the size hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatGround(pub f32);

impl HeightSampler for FlatGround {
    fn height_at(&self, _x: f32, _z: f32, _size_hint: f32) -> Option<f32> {
        Some(self.0)
    }
}
