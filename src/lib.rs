//! A CPU-based software-rendered 3D graphics engine.
//!
//! Meshes are projected, lit by a single point light and scan-converted into
//! a B,G,R,A color buffer with a per-pixel depth buffer. SDL2 is used only to
//! show the finished frames; everything else runs on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use softengine::prelude::*;
//!
//! let mut engine = Engine::new(640, 480);
//! let camera = Camera::default();
//! let meshes = vec![Mesh::cube()];
//!
//! engine.clear(0, 0, 0, 255);
//! engine.render(&camera, &meshes);
//!
//! let mut surface = ImageSurface::new();
//! engine.present(&mut surface)?;
//! surface.save_png("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod texture;
pub mod transform;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, FaceColoring, ShadingMode};
pub use mesh::{LoadError, Mesh};
pub use render::RenderMode;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softengine::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::Camera;
    pub use crate::light::PointLight;
    pub use crate::mesh::{Face, LoadError, Mesh, Vertex};
    pub use crate::scene::load_meshes;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Engine
    pub use crate::config::{ConfigError, RenderConfig};
    pub use crate::engine::{Engine, FaceColoring, ShadingMode};
    pub use crate::projection::Projection;
    pub use crate::render::{FrameBuffer, RenderMode};

    // Math
    pub use crate::colors::Color4;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Presentation
    pub use crate::surface::{ImageSurface, PresentTarget};
    pub use crate::window::{FrameLimiter, Key, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, ShadedVertex, Triangle};
}
