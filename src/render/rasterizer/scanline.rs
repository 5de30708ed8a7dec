//! Scanline-based triangle rasterization.
//!
//! Triangles are filled one horizontal row at a time between two interpolated
//! edge boundaries, with per-pixel depth testing.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y coordinate (top to bottom in screen space) into
//!    `p1`, `p2`, `p3`
//! 2. **Classify** the triangle by which side of the long edge `p1 → p3`
//!    the middle vertex `p2` lies on
//! 3. **Walk rows** from `p1.y` to `p3.y`. Each row is bounded by the long edge
//!    and by whichever short edge (`p1 → p2` above `p2.y`, `p2 → p3` below)
//!    spans it, left boundary first
//! 4. **Fill the span** between the two boundaries, interpolating depth,
//!    light intensity and texture coordinates
//!
//! # Triangle Classification
//!
//! Comparing the inverse slopes `dP1P2` and `dP1P3` tells which side `p2` is on:
//!
//! ```text
//!   right-leaning            left-leaning
//!   (dP1P2 > dP1P3)          (dP1P2 <= dP1P3)
//!
//!     p1                          p1
//!     | \                        / |
//!     |   \                    /   |
//!     |     p2              p2     |
//!     |   /                    \   |
//!     | /                        \ |
//!     p3                          p3
//! ```
//!
//! A flat top (`p2.y == p1.y`) has no usable `dP1P2`; there the x order of
//! `p1` and `p2` decides.
//!
//! # Attribute Interpolation
//!
//! Every attribute goes through [`interpolate`], first along each edge using
//! the row's vertical progress, then across the row using horizontal progress.
//! Gradients are clamped, so attributes never overshoot their endpoints.
//! Interpolation is linear in screen space; there is no perspective correction.

use super::{Fragment, PixelShader, Rasterizer, ShadedVertex, SolidShader, TextureShader, Triangle};
use crate::math::{interpolate, vec2::Vec2};
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Edges shorter than this in Y are treated as horizontal.
const HORIZONTAL_EDGE_EPSILON: f32 = 1e-4;

/// Scanline-based triangle rasterizer.
///
/// Fills with the face color, or with a texture sample when all three corners
/// carry UVs, both scaled by the interpolated light intensity. Flat shading is
/// simply three equal corner intensities.
pub struct ScanlineRasterizer;

/// One directed triangle edge, top vertex first.
#[derive(Clone, Copy)]
struct Edge<'a> {
    start: &'a ShadedVertex,
    end: &'a ShadedVertex,
}

impl<'a> Edge<'a> {
    fn new(start: &'a ShadedVertex, end: &'a ShadedVertex) -> Self {
        Self { start, end }
    }

    /// Vertical progress of row `y` along this edge. Horizontal edges report 1.
    #[inline]
    fn gradient(&self, y: f32) -> f32 {
        let dy = self.end.position.y - self.start.position.y;
        if dy.abs() > HORIZONTAL_EDGE_EPSILON {
            (y - self.start.position.y) / dy
        } else {
            1.0
        }
    }

    /// Interpolated attributes where row `y` crosses this edge.
    #[inline]
    fn boundary(&self, y: f32) -> Boundary {
        let g = self.gradient(y);
        let (s, e) = (self.start, self.end);
        let (su, eu) = (s.uv.unwrap_or(Vec2::ZERO), e.uv.unwrap_or(Vec2::ZERO));
        Boundary {
            x: interpolate(s.position.x, e.position.x, g) as i32,
            z: interpolate(s.position.z, e.position.z, g),
            intensity: interpolate(s.intensity, e.intensity, g),
            uv: Vec2::new(interpolate(su.x, eu.x, g), interpolate(su.y, eu.y, g)),
        }
    }
}

/// Left or right end of a span.
#[derive(Clone, Copy, Debug)]
struct Boundary {
    x: i32,
    z: f32,
    intensity: f32,
    uv: Vec2,
}

/// The row being filled and the two edges that bound it.
struct ScanLine<'a> {
    y: i32,
    left: Edge<'a>,
    right: Edge<'a>,
}

impl ScanlineRasterizer {
    /// Creates a new scanline rasterizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by Y coordinate (ascending: top to bottom in screen space).
    ///
    /// Swaps only on strictly greater Y, so vertices with equal Y keep their
    /// input order. After sorting: `v0.y <= v1.y <= v2.y`
    fn sort_vertices(v0: &mut ShadedVertex, v1: &mut ShadedVertex, v2: &mut ShadedVertex) {
        if v0.position.y > v1.position.y {
            std::mem::swap(v0, v1);
        }
        if v1.position.y > v2.position.y {
            std::mem::swap(v1, v2);
        }
        if v0.position.y > v1.position.y {
            std::mem::swap(v0, v1);
        }
    }

    /// Whether `p2` lies right of the long edge `p1 → p3`. Expects sorted input.
    fn is_right_leaning(p1: &ShadedVertex, p2: &ShadedVertex, p3: &ShadedVertex) -> bool {
        let (p1, p2, p3) = (p1.position, p2.position, p3.position);

        if p2.y - p1.y <= 0.0 {
            // Flat top: the slope is undefined, compare x directly.
            return p2.x > p1.x;
        }

        let d_p1_p2 = (p2.x - p1.x) / (p2.y - p1.y);
        let d_p1_p3 = if p3.y - p1.y > 0.0 {
            (p3.x - p1.x) / (p3.y - p1.y)
        } else {
            0.0
        };

        d_p1_p2 > d_p1_p3
    }

    /// Walks every row of the triangle, choosing the bounding edges per row.
    fn fill<S: PixelShader>(&self, vertices: [ShadedVertex; 3], shader: &S, buffer: &mut FrameBuffer) {
        let [mut v1, mut v2, mut v3] = vertices;
        Self::sort_vertices(&mut v1, &mut v2, &mut v3);

        let right_leaning = Self::is_right_leaning(&v1, &v2, &v3);
        let long = Edge::new(&v1, &v3);
        let top = Edge::new(&v1, &v2);
        let bottom = Edge::new(&v2, &v3);

        // Rows outside the buffer would only produce dropped pixels.
        let y_start = (v1.position.y.floor() as i32).max(0);
        let y_end = (v3.position.y.floor() as i32).min(buffer.height() as i32 - 1);

        for y in y_start..=y_end {
            let short = if (y as f32) < v2.position.y { top } else { bottom };
            let (left, right) = if right_leaning {
                (long, short)
            } else {
                (short, long)
            };
            Self::process_scan_line(&ScanLine { y, left, right }, shader, buffer);
        }
    }

    /// Fills one row from the left boundary up to, but excluding, the right boundary.
    fn process_scan_line<S: PixelShader>(line: &ScanLine, shader: &S, buffer: &mut FrameBuffer) {
        let y = line.y as f32;
        let mut start = line.left.boundary(y);
        let mut end = line.right.boundary(y);
        if start.x > end.x {
            std::mem::swap(&mut start, &mut end);
        }

        // i64 keeps the span exact for far off-screen boundaries.
        let span = (end.x as i64 - start.x as i64).max(1) as f32;
        let x_start = start.x.max(0);
        let x_end = end.x.min(buffer.width() as i32);

        for x in x_start..x_end {
            let gradient = (x as i64 - start.x as i64) as f32 / span;

            let z = interpolate(start.z, end.z, gradient);
            let fragment = Fragment {
                intensity: interpolate(start.intensity, end.intensity, gradient),
                uv: Vec2::new(
                    interpolate(start.uv.x, end.uv.x, gradient),
                    interpolate(start.uv.y, end.uv.y, gradient),
                ),
            };

            buffer.draw_point(x, line.y, z, shader.shade(&fragment));
        }
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, texture: Option<&Texture>) {
        if triangle.has_uv() {
            let shader = TextureShader::new(texture, triangle.color);
            self.fill(triangle.vertices, &shader, buffer);
        } else {
            let shader = SolidShader::new(triangle.color);
            self.fill(triangle.vertices, &shader, buffer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color4;
    use crate::math::vec3::Vec3;

    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn buffer(width: u32, height: u32) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        fb.clear(0, 0, 0, 255);
        fb
    }

    fn flat(points: [(f32, f32, f32); 3], color: Color4) -> Triangle {
        let [a, b, c] = points.map(|(x, y, z)| ShadedVertex::new(Vec3::new(x, y, z), 1.0));
        Triangle::new([a, b, c], color)
    }

    fn reference_triangle() -> [(f32, f32, f32); 3] {
        [(10.0, 10.0, 0.5), (50.0, 10.0, 0.5), (30.0, 50.0, 0.5)]
    }

    /// Expected coverage of the reference triangle, derived row by row from its
    /// two bounding edges (10,10)→(30,50) on the left and (50,10)→(30,50) on the right.
    fn reference_covers(x: i32, y: i32) -> bool {
        if !(10..=50).contains(&y) {
            return false;
        }
        let g = (y as f32 - 10.0) / 40.0;
        let sx = interpolate(10.0, 30.0, g) as i32;
        let ex = interpolate(50.0, 30.0, g) as i32;
        x >= sx && x < ex
    }

    #[test]
    fn fills_reference_triangle_exactly() {
        let mut fb = buffer(100, 100);
        ScanlineRasterizer::new().fill_triangle(&flat(reference_triangle(), Color4::RED), &mut fb, None);

        let red = Color4::RED.to_bgra();
        for y in 0..100 {
            for x in 0..100 {
                let expected = if reference_covers(x, y) { red } else { BLACK };
                assert_eq!(fb.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
        // First row spans [10, 50), the apex row is empty
        assert_eq!(fb.pixel(10, 10), Some(red));
        assert_eq!(fb.pixel(49, 10), Some(red));
        assert_eq!(fb.pixel(50, 10), Some(BLACK));
    }

    #[test]
    fn vertex_order_does_not_change_coverage() {
        let [a, b, c] = reference_triangle();
        let orders = [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];

        let mut reference = buffer(64, 64);
        ScanlineRasterizer::new().fill_triangle(&flat(orders[0], Color4::RED), &mut reference, None);

        for order in &orders[1..] {
            let mut fb = buffer(64, 64);
            ScanlineRasterizer::new().fill_triangle(&flat(*order, Color4::RED), &mut fb, None);
            assert_eq!(fb.as_bytes(), reference.as_bytes(), "order {order:?}");
        }
    }

    #[test]
    fn left_leaning_triangle_is_filled() {
        // p2 left of the long edge
        let mut fb = buffer(40, 40);
        let tri = flat([(20.0, 2.0, 0.5), (2.0, 20.0, 0.5), (22.0, 38.0, 0.5)], Color4::GREEN);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert_eq!(fb.pixel(15, 20), Some(Color4::GREEN.to_bgra()));
        assert_eq!(fb.pixel(30, 20), Some(BLACK));
    }

    #[test]
    fn right_leaning_triangle_is_filled() {
        let mut fb = buffer(40, 40);
        let tri = flat([(5.0, 2.0, 0.5), (35.0, 20.0, 0.5), (8.0, 38.0, 0.5)], Color4::GREEN);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert_eq!(fb.pixel(20, 20), Some(Color4::GREEN.to_bgra()));
        assert_eq!(fb.pixel(2, 20), Some(BLACK));
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let near = |color| {
            flat(
                [(5.0, 5.0, 0.3), (60.0, 8.0, 0.3), (20.0, 60.0, 0.3)],
                color,
            )
        };
        let far = |color| {
            flat(
                [(5.0, 5.0, 0.7), (60.0, 8.0, 0.7), (20.0, 60.0, 0.7)],
                color,
            )
        };
        let rasterizer = ScanlineRasterizer::new();

        let mut near_first = buffer(64, 64);
        rasterizer.fill_triangle(&near(Color4::RED), &mut near_first, None);
        rasterizer.fill_triangle(&far(Color4::BLUE), &mut near_first, None);

        let mut far_first = buffer(64, 64);
        rasterizer.fill_triangle(&far(Color4::BLUE), &mut far_first, None);
        rasterizer.fill_triangle(&near(Color4::RED), &mut far_first, None);

        let blue = Color4::BLUE.to_bgra();
        let mut covered = 0;
        for fb in [&near_first, &far_first] {
            for pixel in fb.as_bytes().chunks_exact(4) {
                assert_ne!(pixel, blue);
                if pixel != BLACK {
                    covered += 1;
                }
            }
        }
        assert!(covered > 0);
        assert_eq!(near_first.as_bytes(), far_first.as_bytes());
    }

    #[test]
    fn offscreen_vertices_are_clipped_safely() {
        let mut fb = buffer(100, 100);
        let tri = flat(
            [(-50.0, -30.0, 0.5), (150.0, 20.0, 0.5), (40.0, 300.0, 0.5)],
            Color4::WHITE,
        );
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert_eq!(fb.pixel(50, 50), Some(Color4::WHITE.to_bgra()));
    }

    #[test]
    fn huge_and_degenerate_triangles_do_not_panic() {
        let mut fb = buffer(32, 32);
        let rasterizer = ScanlineRasterizer::new();
        let cases = [
            [(-1e30, -1e30, 0.5), (1e30, 5.0, 0.5), (3.0, 1e30, 0.5)],
            [(4.0, 4.0, 0.5), (4.0, 4.0, 0.5), (4.0, 4.0, 0.5)],
            [(1.0, 5.0, 0.5), (20.0, 5.0, 0.5), (30.0, 5.0, 0.5)],
            [(8.0, 1.0, 0.5), (8.0, 10.0, 0.5), (8.0, 30.0, 0.5)],
        ];
        for points in cases {
            rasterizer.fill_triangle(&flat(points, Color4::WHITE), &mut fb, None);
        }
    }

    #[test]
    fn zero_width_rows_write_nothing() {
        let mut fb = buffer(32, 32);
        let tri = flat([(8.0, 1.0, 0.5), (8.0, 10.0, 0.5), (8.0, 30.0, 0.5)], Color4::WHITE);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert!(fb.as_bytes().chunks_exact(4).all(|p| p == BLACK));
    }

    #[test]
    fn intensity_is_interpolated_across_span() {
        let mut fb = buffer(64, 64);
        let tri = Triangle::new(
            [
                ShadedVertex::new(Vec3::new(0.0, 0.0, 0.5), 0.0),
                ShadedVertex::new(Vec3::new(63.0, 0.0, 0.5), 1.0),
                ShadedVertex::new(Vec3::new(0.0, 63.0, 0.5), 0.0),
            ],
            Color4::WHITE,
        );
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);

        let red_at = |x| fb.pixel(x, 4).map(|p| p[2]).unwrap_or(0);
        assert!(red_at(2) < red_at(20));
        assert!(red_at(20) < red_at(50));
    }

    #[test]
    fn depth_is_interpolated_across_span() {
        let mut fb = buffer(64, 64);
        let tri = flat([(0.0, 0.0, 0.2), (60.0, 0.0, 0.8), (0.0, 60.0, 0.2)], Color4::WHITE);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);

        let left = fb.depth(1, 2).unwrap();
        let right = fb.depth(50, 2).unwrap();
        assert!(left >= 0.2 && right <= 0.8);
        assert!(left < right);
    }

    #[test]
    fn textured_triangle_samples_texture() {
        let texture = Texture::from_bgra(1, 1, vec![0, 255, 0, 255]).unwrap();
        let corner = |x, y, u, v| ShadedVertex::with_uv(Vec3::new(x, y, 0.5), 1.0, Vec2::new(u, v));
        let tri = Triangle::new(
            [
                corner(2.0, 2.0, 0.0, 0.0),
                corner(30.0, 2.0, 1.0, 0.0),
                corner(2.0, 30.0, 0.0, 1.0),
            ],
            Color4::WHITE,
        );

        let mut fb = buffer(32, 32);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, Some(&texture));
        assert_eq!(fb.pixel(5, 5), Some(Color4::GREEN.to_bgra()));

        // Same triangle without a bound texture falls back to the face color
        let mut fb = buffer(32, 32);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert_eq!(fb.pixel(5, 5), Some(Color4::WHITE.to_bgra()));
    }

    #[test]
    fn uvs_follow_edges_and_spans() {
        // 2x2 checker, B,G,R,A: (0,0) red, (1,0) green, (0,1) blue, (1,1) white
        let (red, green, blue, white) = ([0, 0, 255, 255], [0, 255, 0, 255], [255, 0, 0, 255], [255; 4]);
        let texture = Texture::from_bgra(2, 2, [red, green, blue, white].concat()).unwrap();

        // UVs land on u = x / 64, v = y / 64 inside the triangle
        let corner = |x, y, u, v| ShadedVertex::with_uv(Vec3::new(x, y, 0.5), 1.0, Vec2::new(u, v));
        let tri = Triangle::new(
            [
                corner(0.0, 0.0, 0.0, 0.0),
                corner(64.0, 0.0, 1.0, 0.0),
                corner(0.0, 64.0, 0.0, 1.0),
            ],
            Color4::WHITE,
        );

        let mut fb = buffer(64, 64);
        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, Some(&texture));

        // Across one span
        assert_eq!(fb.pixel(4, 4), Some(red));
        assert_eq!(fb.pixel(40, 4), Some(green));
        // Down the left edge
        assert_eq!(fb.pixel(4, 40), Some(blue));
        assert_eq!(fb.pixel(20, 40), Some(blue));
        // Near the right edge of a lower row
        assert_eq!(fb.pixel(33, 20), Some(green));
        assert!(fb.as_bytes().chunks_exact(4).all(|p| p != white));
    }

    #[test]
    fn sort_is_stable_for_equal_y() {
        let a = ShadedVertex::new(Vec3::new(1.0, 5.0, 0.0), 0.1);
        let b = ShadedVertex::new(Vec3::new(2.0, 5.0, 0.0), 0.2);
        let c = ShadedVertex::new(Vec3::new(3.0, 1.0, 0.0), 0.3);
        let (mut v0, mut v1, mut v2) = (a, b, c);
        ScanlineRasterizer::sort_vertices(&mut v0, &mut v1, &mut v2);
        assert_eq!([v0, v1, v2], [c, a, b]);
    }
}
