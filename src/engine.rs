//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns the
//! color and depth buffers and runs the per-frame pipeline:
//!
//! 1. [`Engine::clear`] resets both buffers
//! 2. [`Engine::render`] projects every mesh, shades each face and rasterizes it
//! 3. [`Engine::present`] hands the color buffer to a [`PresentTarget`]
//!
//! Everything runs on the calling thread. Meshes and the camera are only read.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::colors::Color4;
use crate::config::RenderConfig;
use crate::light::PointLight;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{FrameBuffer, Rasterizer, RasterizerDispatcher, RenderMode, ShadedVertex, Triangle};
use crate::surface::PresentTarget;
use crate::transform::{self, MeshMatrices, ProjectedVertex};

/// How light intensity is computed per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingMode {
    /// One intensity per face (key: F)
    #[default]
    Flat,
    /// Per-vertex intensity interpolated across the face (key: G)
    Gouraud,
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gouraud => write!(f, "Gouraud"),
        }
    }
}

/// Base color of untextured faces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum FaceColoring {
    /// Every face gets the same color.
    Solid(Color4),
    /// Gray ramp by face index, from 0.25 towards 1.0 across the mesh.
    #[default]
    IndexGradient,
}

impl FaceColoring {
    /// Color of face `index` in a mesh of `face_count` faces.
    pub fn color_for(&self, index: usize, face_count: usize) -> Color4 {
        match *self {
            FaceColoring::Solid(color) => color,
            FaceColoring::IndexGradient => {
                let n = face_count.max(1);
                Color4::gray(0.25 + (index % n) as f32 * 0.75 / n as f32)
            }
        }
    }
}

pub struct Engine {
    framebuffer: FrameBuffer,
    rasterizer: RasterizerDispatcher,
    projection: Projection,
    light: PointLight,
    shading: ShadingMode,
    texturing: bool,
    face_coloring: FaceColoring,
    /// Scratch space reused across meshes and frames.
    projected: Vec<ProjectedVertex>,
}

impl Engine {
    /// Creates an engine with the default configuration at the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&RenderConfig {
            width,
            height,
            ..RenderConfig::default()
        })
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        log::info!(
            "Creating {}x{} engine ({} mode, {} shading)",
            config.width,
            config.height,
            config.render_mode,
            config.shading
        );
        Self {
            framebuffer: FrameBuffer::new(config.width, config.height),
            rasterizer: RasterizerDispatcher::new(config.render_mode),
            projection: config.projection(),
            light: PointLight::new(config.light_position),
            shading: config.shading,
            texturing: config.texturing,
            face_coloring: config.face_coloring,
            projected: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Reallocates the buffers and matches the projection's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::info!("Resizing engine to {}x{}", width, height);
        self.framebuffer.resize(width, height);
        self.projection.set_aspect_ratio(width as f32 / height.max(1) as f32);
    }

    // ============ Settings ============

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.rasterizer.set_mode(mode);
    }

    pub fn render_mode(&self) -> RenderMode {
        self.rasterizer.mode()
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading = mode;
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading
    }

    pub fn set_texturing(&mut self, enabled: bool) {
        self.texturing = enabled;
    }

    pub fn texturing(&self) -> bool {
        self.texturing
    }

    pub fn set_face_coloring(&mut self, coloring: FaceColoring) {
        self.face_coloring = coloring;
    }

    pub fn face_coloring(&self) -> FaceColoring {
        self.face_coloring
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut PointLight {
        &mut self.light
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    /// Returns the rendered frame (B,G,R,A) with its depth buffer.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    // ============ Frame ============

    /// Fills the color buffer with `(r, g, b, a)` and resets the depth buffer.
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.framebuffer.clear(r, g, b, a);
    }

    /// Draws every mesh as seen from `camera` into the buffers.
    ///
    /// Does not clear first. Face indices must be within their mesh's vertex
    /// array; meshes from the loaders are validated.
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) {
        let view = camera.view_matrix();
        let projection = self.projection.matrix();
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let mut triangle_count = 0;

        for mesh in meshes {
            let matrices = MeshMatrices::new(mesh.transform().to_matrix(), view, projection);

            self.projected.clear();
            self.projected.extend(
                mesh.vertices()
                    .iter()
                    .map(|vertex| transform::project(vertex, &matrices, width, height)),
            );

            let texture = if self.texturing { mesh.texture() } else { None };
            let face_count = mesh.faces().len();

            for (index, face) in mesh.faces().iter().enumerate() {
                let corners = face.indices().map(|i| &self.projected[i]);
                let textured = texture.is_some() && corners.iter().all(|v| v.uv.is_some());
                let color = if textured {
                    Color4::WHITE
                } else {
                    self.face_coloring.color_for(index, face_count)
                };

                let triangle = shade_triangle(corners, &self.light, self.shading, color, textured);
                self.rasterizer.fill_triangle(&triangle, &mut self.framebuffer, texture);
            }
            triangle_count += face_count;
        }

        log::trace!("Rendered {} triangles from {} meshes", triangle_count, meshes.len());
    }

    /// Hands the color buffer to `target`.
    pub fn present<T: PresentTarget>(&self, target: &mut T) -> Result<(), T::Error> {
        target.present(self.framebuffer.as_bytes(), self.framebuffer.width(), self.framebuffer.height())
    }
}

/// Turns three projected corners into a rasterizer triangle with light intensities.
fn shade_triangle(
    corners: [&ProjectedVertex; 3],
    light: &PointLight,
    shading: ShadingMode,
    color: Color4,
    textured: bool,
) -> Triangle {
    let intensities = match shading {
        ShadingMode::Flat => [light.face_intensity(corners); 3],
        ShadingMode::Gouraud => corners.map(|v| light.vertex_intensity(v)),
    };

    let mut vertices = [ShadedVertex::new(corners[0].screen, 0.0); 3];
    for ((slot, corner), intensity) in vertices.iter_mut().zip(corners).zip(intensities) {
        *slot = match corner.uv {
            Some(uv) if textured => ShadedVertex::with_uv(corner.screen, intensity, uv),
            _ => ShadedVertex::new(corner.screen, intensity),
        };
    }
    Triangle::new(vertices, color)
}
