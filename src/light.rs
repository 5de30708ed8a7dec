//! Lighting for the renderer.
//!
//! A single point light with a pure Lambert term: no ambient, no specular.

use crate::math::vec3::Vec3;
use crate::transform::ProjectedVertex;

/// Cosine of the angle between `surface_normal` and the direction from
/// `surface_point` to `light_position`, clamped to `[0, 1]`.
///
/// A zero-length normal or a light sitting on the surface point yields 0.
pub fn compute_intensity(surface_point: Vec3, surface_normal: Vec3, light_position: Vec3) -> f32 {
    let light_direction = light_position - surface_point;
    let normal_length = surface_normal.magnitude();
    let light_length = light_direction.magnitude();
    if normal_length <= f32::EPSILON || light_length <= f32::EPSILON {
        return 0.0;
    }

    let ndotl = (surface_normal / normal_length).dot(light_direction / light_length);
    // NaN from non-finite input clamps to 0 through f32::max
    ndotl.max(0.0).min(1.0)
}

/// A point light fixed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 10.0, 10.0))
    }
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Lambert intensity at an arbitrary surface point.
    pub fn intensity(&self, surface_point: Vec3, surface_normal: Vec3) -> f32 {
        compute_intensity(surface_point, surface_normal, self.position)
    }

    /// Flat shading: one intensity for the whole face, evaluated at the
    /// centroid with the average of the three vertex normals.
    pub fn face_intensity(&self, vertices: [&ProjectedVertex; 3]) -> f32 {
        let [a, b, c] = vertices;
        let center = Vec3::centroid(a.world_position, b.world_position, c.world_position);
        let normal = (a.world_normal + b.world_normal + c.world_normal) / 3.0;
        self.intensity(center, normal)
    }

    /// Per-vertex intensity for Gouraud-style interpolation.
    pub fn vertex_intensity(&self, vertex: &ProjectedVertex) -> f32 {
        self.intensity(vertex.world_position, vertex.world_normal)
    }
}
