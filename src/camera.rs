//! Look-at camera.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! The camera is a position and a target point. Its up reference is always
//! world up (+Y), so a target straight above or below the position is degenerate.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for Camera {
    /// Ten units back on +Z, looking at the origin.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Returns the normalized viewing direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Computes the view matrix (world → camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, Vec3::UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.forward().z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO);
        let origin = camera.view_matrix() * Vec3::ZERO;
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn camera_position_maps_to_view_origin() {
        let camera = Camera::new(Vec3::new(3.0, 4.0, -2.0), Vec3::new(1.0, 0.0, 6.0));
        let eye = camera.view_matrix() * camera.position;
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-5);
    }
}
