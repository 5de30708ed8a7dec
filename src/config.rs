//! Render configuration, stored as RON.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```ron
//! (
//!     width: 800,
//!     height: 600,
//!     shading: Gouraud,
//!     face_coloring: Solid((r: 1.0, g: 0.5, b: 0.0, a: 1.0)),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Camera;
use crate::engine::{FaceColoring, ShadingMode};
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::render::RenderMode;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Everything needed to set up the engine and drive the demo loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub light_position: Vec3,
    /// R, G, B, A
    pub clear_color: [u8; 4],
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub shading: ShadingMode,
    pub render_mode: RenderMode,
    pub texturing: bool,
    pub face_coloring: FaceColoring,
    /// Euler rotation added to every mesh once per frame.
    pub rotation_delta: Vec3,
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "SoftEngine".to_string(),
            width: 640,
            height: 480,
            fov_y: 0.78,
            z_near: 0.01,
            z_far: 1.0,
            light_position: Vec3::new(0.0, 10.0, 10.0),
            clear_color: [0, 0, 0, 255],
            camera_position: Vec3::new(0.0, 0.0, 10.0),
            camera_target: Vec3::ZERO,
            shading: ShadingMode::default(),
            render_mode: RenderMode::default(),
            texturing: true,
            face_coloring: FaceColoring::default(),
            rotation_delta: Vec3::new(0.0, 0.01, 0.0),
            target_fps: 60,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a `.ron` file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        ensure_ron(path)?;
        let contents = std::fs::read_to_string(path)?;
        let config = ron::from_str(&contents)?;
        log::info!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.ron` file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        ensure_ron(path)?;
        let contents = ron::ser::to_string_pretty(self, Default::default())?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_position, self.camera_target)
    }

    pub fn projection(&self) -> Projection {
        Projection::for_viewport(self.fov_y, self.width, self.height.max(1), self.z_near, self.z_far)
    }
}

fn ensure_ron(path: &Path) -> Result<(), ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(()),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}
