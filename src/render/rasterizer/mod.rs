//! Triangle rasterization.
//!
//! Every render mode is a [`Rasterizer`] over the same projected, shaded
//! triangles, so the mode can be swapped at runtime without touching the
//! transform stage or the buffers.
//!
//! Available rasterizers:
//! - [`ScanlineRasterizer`]: depth-tested scan-line fill (filled mode)
//! - [`WireframeRasterizer`]: Bresenham edges with interpolated depth
//! - [`PointRasterizer`]: one pixel per triangle corner

mod points;
mod scanline;
mod shader;
mod wireframe;

pub use points::PointRasterizer;
pub use scanline::ScanlineRasterizer;
pub use shader::{Fragment, PixelShader, SolidShader, TextureShader};
pub use wireframe::WireframeRasterizer;

use serde::{Deserialize, Serialize};

use super::framebuffer::FrameBuffer;
use crate::colors::Color4;
use crate::math::{vec2::Vec2, vec3::Vec3};
use crate::texture::Texture;

/// A triangle corner ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedVertex {
    /// Pixel-space x/y plus normalized depth.
    pub position: Vec3,
    /// Light intensity at this corner, in `[0, 1]`.
    pub intensity: f32,
    pub uv: Option<Vec2>,
}

impl ShadedVertex {
    pub const fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
            uv: None,
        }
    }

    pub const fn with_uv(position: Vec3, intensity: f32, uv: Vec2) -> Self {
        Self {
            position,
            intensity,
            uv: Some(uv),
        }
    }
}

/// A triangle in screen space with its shading payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [ShadedVertex; 3],
    /// Face color, multiplied by the interpolated intensity per pixel.
    pub color: Color4,
}

impl Triangle {
    pub fn new(vertices: [ShadedVertex; 3], color: Color4) -> Self {
        Self { vertices, color }
    }

    /// True when all three corners carry texture coordinates.
    pub fn has_uv(&self) -> bool {
        self.vertices.iter().all(|v| v.uv.is_some())
    }
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors decide which pixels a triangle covers and hand each one to
/// [`FrameBuffer::draw_point`], which owns bounds and depth testing.
pub trait Rasterizer {
    /// Draw a triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The triangle to rasterize
    /// * `buffer` - The frame buffer to draw into
    /// * `texture` - Texture sampled when the triangle carries UVs
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, texture: Option<&Texture>);
}

/// How triangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Triangle corners only (key: 1)
    Points,
    /// Triangle edges (key: 2)
    Wireframe,
    /// Depth-tested scan-line fill (key: 3)
    #[default]
    Filled,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Points => write!(f, "Points"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::Filled => write!(f, "Filled"),
        }
    }
}

/// Internal dispatcher that holds every rasterizer implementation.
pub struct RasterizerDispatcher {
    points: PointRasterizer,
    wireframe: WireframeRasterizer,
    scanline: ScanlineRasterizer,
    active: RenderMode,
}

impl RasterizerDispatcher {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            points: PointRasterizer::new(),
            wireframe: WireframeRasterizer::new(),
            scanline: ScanlineRasterizer::new(),
            active: mode,
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.active = mode;
    }

    pub fn mode(&self) -> RenderMode {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, texture: Option<&Texture>) {
        match self.active {
            RenderMode::Points => self.points.fill_triangle(triangle, buffer, texture),
            RenderMode::Wireframe => self.wireframe.fill_triangle(triangle, buffer, texture),
            RenderMode::Filled => self.scanline.fill_triangle(triangle, buffer, texture),
        }
    }
}
