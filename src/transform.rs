//! Object placement and the vertex transform stage.
//!
//! [`Transform`] holds a mesh's world-space position and Euler rotation.
//! [`project`] takes an object-space [`Vertex`] through the per-mesh matrices
//! into a [`ProjectedVertex`]: pixel-space x/y, a normalized depth, and the
//! world-space position and normal needed for lighting.

use crate::math::{mat4::Mat4, vec2::Vec2, vec3::Vec3};
use crate::mesh::Vertex;

/// A 3D placement with position and rotation (Euler angles).
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(0.1);
/// ```
///
/// There is deliberately no scale: normals go through the world matrix
/// unchanged, which is only valid for rigid transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
}

impl Transform {
    /// Create a new transform at the origin with no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    /// Rotate around the X axis (pitch).
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    // ============ Matrix Generation ============

    /// Generate the world matrix.
    ///
    /// Order: Translation * Yaw(Y) * Pitch(X) * Roll(Z), so the object is
    /// rotated about its own origin before being moved into place.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_yaw_pitch_roll(self.rotation.y, self.rotation.x, self.rotation.z)
    }
}

/// A vertex after the transform stage. Rebuilt every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedVertex {
    /// Pixel-space x/y; z is the normalized depth (smaller is nearer).
    pub screen: Vec3,
    pub world_normal: Vec3,
    pub world_position: Vec3,
    pub uv: Option<Vec2>,
}

/// The two matrices the transform stage needs for one mesh in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshMatrices {
    /// Object space → world space.
    pub world: Mat4,
    /// Object space → normalized device coordinates (projection * view * world).
    pub transform: Mat4,
}

impl MeshMatrices {
    pub fn new(world: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            world,
            transform: projection * view * world,
        }
    }
}

/// Projects a vertex to pixel space and carries its world-space attributes along.
///
/// NDC is mapped with `x * width + width / 2` and `-y * height + height / 2`
/// (pixel rows grow downward). The NDC depth passes through unchanged.
///
/// The normal goes through the full world matrix rather than its inverse
/// transpose, translation included.
pub fn project(vertex: &Vertex, matrices: &MeshMatrices, width: u32, height: u32) -> ProjectedVertex {
    let ndc = matrices.transform * vertex.coordinates;
    let world_position = matrices.world * vertex.coordinates;
    let world_normal = matrices.world * vertex.normal;

    let (w, h) = (width as f32, height as f32);
    let x = ndc.x * w + w / 2.0;
    let y = -ndc.y * h + h / 2.0;

    ProjectedVertex {
        screen: Vec3::new(x, y, ndc.z),
        world_normal,
        world_position,
        uv: vertex.uv,
    }
}
