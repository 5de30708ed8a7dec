//! Small linear algebra kit used by the pipeline.

pub mod mat4;
pub mod vec2;
pub mod vec3;

/// Clamps `value` into `[min, max]`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation between `min` and `max` with the gradient clamped to `[0, 1]`.
///
/// The result never leaves the `[min, max]` segment, even when an upstream
/// gradient computation drifts outside the unit interval.
#[inline]
pub fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    min + (max - min) * clamp(gradient, 0.0, 1.0)
}
