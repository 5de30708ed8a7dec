//! Point rendering: one depth-tested pixel per triangle corner.

use super::{Rasterizer, Triangle};
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Draws each corner as a single pixel colored by its own intensity.
pub struct PointRasterizer;

impl PointRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PointRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for PointRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, _texture: Option<&Texture>) {
        for vertex in &triangle.vertices {
            let p = vertex.position;
            // floor so corners in (-1, 0) fall off the buffer instead of onto row or column 0
            buffer.draw_point(p.x.floor() as i32, p.y.floor() as i32, p.z, triangle.color.scale(vertex.intensity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color4;
    use crate::math::vec3::Vec3;
    use crate::render::rasterizer::ShadedVertex;

    #[test]
    fn corners_are_drawn_and_offscreen_ones_dropped() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.clear(0, 0, 0, 255);
        let tri = Triangle::new(
            [
                ShadedVertex::new(Vec3::new(1.2, 1.7, 0.5), 1.0),
                ShadedVertex::new(Vec3::new(6.0, 3.0, 0.5), 0.0),
                ShadedVertex::new(Vec3::new(-4.0, 30.0, 0.5), 1.0),
            ],
            Color4::RED,
        );
        PointRasterizer::new().fill_triangle(&tri, &mut fb, None);

        assert_eq!(fb.pixel(1, 1), Some(Color4::RED.to_bgra()));
        // zero intensity darkens alpha too
        assert_eq!(fb.pixel(6, 3), Some([0, 0, 0, 0]));
        assert_eq!(fb.depth(6, 3), Some(0.5));
    }

    #[test]
    fn fractional_negative_corners_are_dropped() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.clear(0, 0, 0, 255);
        let tri = Triangle::new(
            [
                ShadedVertex::new(Vec3::new(-0.5, 3.0, 0.5), 1.0),
                ShadedVertex::new(Vec3::new(4.0, -0.25, 0.5), 1.0),
                ShadedVertex::new(Vec3::new(-0.9, -0.9, 0.5), 1.0),
            ],
            Color4::RED,
        );
        PointRasterizer::new().fill_triangle(&tri, &mut fb, None);

        assert!(fb.as_bytes().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
        assert!(fb.depth_buffer().iter().all(|&z| z == f32::MAX));
    }
}
