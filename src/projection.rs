//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the perspective
//! parameters (FOV, aspect ratio, near/far planes) and generates the matrix.
//! The near/far planes only shape the depth metric; nothing is clipped against them.

use crate::math::mat4::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(0.78, 1.0, 0.01, 1.0)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection whose aspect ratio matches a `width` x `height` target.
    pub fn for_viewport(fov_y: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y, width as f32 / height as f32, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio (typically called on window resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_fov_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn viewport_aspect_is_width_over_height() {
        let proj = Projection::for_viewport(0.78, 640, 480, 0.01, 1.0);
        assert_relative_eq!(proj.aspect_ratio(), 4.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn wider_aspect_shrinks_horizontal_extent() {
        let square = Projection::new(0.78, 1.0, 0.01, 1.0).matrix();
        let wide = Projection::new(0.78, 2.0, 0.01, 1.0).matrix();
        let p = Vec3::new(1.0, 1.0, 5.0);
        assert_relative_eq!((wide * p).x, (square * p).x / 2.0, epsilon = 1e-6);
        assert_relative_eq!((wide * p).y, (square * p).y, epsilon = 1e-6);
    }
}
