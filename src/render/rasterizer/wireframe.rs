//! Wireframe rendering: the three edges of each triangle as depth-tested lines.

use super::{Rasterizer, ShadedVertex, Triangle};
use crate::colors::Color4;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Draws triangle edges with Bresenham's algorithm.
///
/// Depth is interpolated linearly along each edge, so lines are occluded by
/// nearer geometry already in the buffer. The face color is scaled by the mean
/// corner intensity; textures are not sampled.
pub struct WireframeRasterizer;

impl WireframeRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Draws a line between two points using Bresenham's line algorithm with depth testing.
    ///
    /// Bresenham's algorithm determines which pixels to illuminate using only
    /// integer arithmetic. It tracks an error term: the distance between the
    /// ideal line and the current pixel. For each step along the major axis, the
    /// accumulated error decides whether to also step along the minor axis.
    ///
    /// The segment is first clipped to the buffer, so far off-screen endpoints
    /// cost nothing.
    pub fn draw_line(buffer: &mut FrameBuffer, from: Vec3, to: Vec3, color: Color4) {
        let Some((from, to)) = clip_segment(from, to, buffer.width(), buffer.height()) else {
            return;
        };

        let (x0, y0) = (from.x as i32, from.y as i32);
        let (x1, y1) = (to.x as i32, to.y as i32);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let steps = dx.max(dy);

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;
        let mut step = 0;

        loop {
            let t = if steps == 0 { 0.0 } else { step as f32 / steps as f32 };
            let z = from.z + t * (to.z - from.z);
            buffer.draw_point(x, y, z, color);

            if x == x1 && y == y1 {
                break;
            }
            step += 1;

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            // Both branches may fire: a diagonal step.
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }
}

impl Default for WireframeRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for WireframeRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, _texture: Option<&Texture>) {
        let [a, b, c] = triangle.vertices;
        let intensity = (a.intensity + b.intensity + c.intensity) / 3.0;
        let color = triangle.color.scale(intensity);

        let edges: [(&ShadedVertex, &ShadedVertex); 3] = [(&a, &b), (&b, &c), (&c, &a)];
        for (start, end) in edges {
            Self::draw_line(buffer, start.position, end.position, color);
        }
    }
}

/// Clips a segment to the pixel rectangle `[0, width) x [0, height)`,
/// interpolating z along with x and y (Liang-Barsky).
fn clip_segment(from: Vec3, to: Vec3, width: u32, height: u32) -> Option<(Vec3, Vec3)> {
    if width == 0 || height == 0 {
        return None;
    }
    let max_x = width as f32 - 0.5;
    let max_y = height as f32 - 0.5;
    let d = to - from;

    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    // (p, q) per boundary: left, right, top, bottom
    let boundaries = [
        (-d.x, from.x),
        (d.x, max_x - from.x),
        (-d.y, from.y),
        (d.y, max_y - from.y),
    ];

    for (p, q) in boundaries {
        if !q.is_finite() {
            return None;
        }
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((from + d * t0, from + d * t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        fb.clear(0, 0, 0, 255);
        fb
    }

    fn lit(fb: &FrameBuffer) -> usize {
        fb.as_bytes().chunks_exact(4).filter(|p| p[..3] != [0, 0, 0]).count()
    }

    #[test]
    fn horizontal_line_covers_every_pixel() {
        let mut fb = cleared(10, 3);
        WireframeRasterizer::draw_line(&mut fb, Vec3::new(1.0, 1.0, 0.5), Vec3::new(8.0, 1.0, 0.5), Color4::WHITE);
        for x in 1..=8 {
            assert_eq!(fb.pixel(x, 1), Some([255, 255, 255, 255]));
        }
        assert_eq!(lit(&fb), 8);
    }

    #[test]
    fn diagonal_line_steps_both_axes() {
        let mut fb = cleared(6, 6);
        WireframeRasterizer::draw_line(&mut fb, Vec3::new(0.0, 0.0, 0.5), Vec3::new(5.0, 5.0, 0.5), Color4::WHITE);
        for i in 0..6 {
            assert_eq!(fb.pixel(i, i), Some([255, 255, 255, 255]));
        }
        assert_eq!(lit(&fb), 6);
    }

    #[test]
    fn depth_is_interpolated_along_the_line() {
        let mut fb = cleared(11, 1);
        WireframeRasterizer::draw_line(&mut fb, Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 1.0), Color4::WHITE);
        let mid = fb.depth(5, 0).unwrap();
        assert!((mid - 0.5).abs() < 1e-5);
    }

    #[test]
    fn far_offscreen_line_is_clipped() {
        let mut fb = cleared(16, 16);
        WireframeRasterizer::draw_line(
            &mut fb,
            Vec3::new(-1e6, 8.0, 0.5),
            Vec3::new(1e6, 8.0, 0.5),
            Color4::WHITE,
        );
        assert_eq!(lit(&fb), 16);

        let mut fb = cleared(16, 16);
        WireframeRasterizer::draw_line(&mut fb, Vec3::new(-50.0, -5.0, 0.5), Vec3::new(-10.0, 40.0, 0.5), Color4::WHITE);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn edges_use_mean_intensity() {
        let mut fb = cleared(20, 20);
        let tri = Triangle::new(
            [
                ShadedVertex::new(Vec3::new(2.0, 2.0, 0.5), 0.0),
                ShadedVertex::new(Vec3::new(17.0, 2.0, 0.5), 1.0),
                ShadedVertex::new(Vec3::new(2.0, 17.0, 0.5), 0.5),
            ],
            Color4::WHITE,
        );
        WireframeRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert_eq!(fb.pixel(10, 2), Some([127, 127, 127, 127]));
        // interior untouched
        assert_eq!(fb.pixel(5, 5), Some([0, 0, 0, 255]));
    }
}
