//! Scene files: several meshes stored as flat vertex arrays.
//!
//! The format is RON. Each vertex is `step` consecutive floats: position (3),
//! normal (3), then two floats per UV channel, so the step is 6, 8 or 10 for
//! `uv_count` 0, 1 or 2. Only the first UV channel is kept.
//!
//! ```ron
//! (
//!     meshes: [
//!         (
//!             name: "Plane",
//!             vertices: [
//!                 -1.0, -1.0, 0.0,  0.0, 0.0, 1.0,  0.0, 1.0,
//!                  1.0, -1.0, 0.0,  0.0, 0.0, 1.0,  1.0, 1.0,
//!                  1.0,  1.0, 0.0,  0.0, 0.0, 1.0,  1.0, 0.0,
//!             ],
//!             indices: [0, 1, 2],
//!             uv_count: 1,
//!             position: (0.0, 0.0, 0.0),
//!             texture: Some("plane.png"),
//!         ),
//!     ],
//! )
//! ```
//!
//! Texture paths are relative to the scene file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::math::{vec2::Vec2, vec3::Vec3};
use crate::mesh::{Face, LoadError, Mesh, Vertex};
use crate::texture::Texture;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub meshes: Vec<MeshDescription>,
}

/// One mesh as stored in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescription {
    pub name: String,
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub uv_count: u32,
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in radians (pitch, yaw, roll).
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub texture: Option<PathBuf>,
}

/// Floats per vertex for a given number of UV channels.
fn vertex_step(mesh: &str, uv_count: u32) -> Result<usize, LoadError> {
    match uv_count {
        0 => Ok(6),
        1 => Ok(8),
        2 => Ok(10),
        _ => Err(LoadError::UnsupportedUvCount {
            mesh: mesh.to_string(),
            uv_count,
        }),
    }
}

impl MeshDescription {
    /// Decodes the flat arrays into a validated mesh. Textures are not loaded here.
    pub fn to_mesh(&self) -> Result<Mesh, LoadError> {
        let step = vertex_step(&self.name, self.uv_count)?;
        if self.vertices.len() % step != 0 {
            return Err(LoadError::IncompleteVertices {
                mesh: self.name.clone(),
                len: self.vertices.len(),
                step,
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(LoadError::IncompleteFaces {
                mesh: self.name.clone(),
                len: self.indices.len(),
            });
        }

        let vertices = self
            .vertices
            .chunks_exact(step)
            .map(|v| {
                let coordinates = Vec3::new(v[0], v[1], v[2]);
                let normal = Vec3::new(v[3], v[4], v[5]);
                if self.uv_count > 0 {
                    Vertex::with_uv(coordinates, normal, Vec2::new(v[6], v[7]))
                } else {
                    Vertex::new(coordinates, normal)
                }
            })
            .collect();

        let faces = self
            .indices
            .chunks_exact(3)
            .map(|f| Face::new(f[0] as usize, f[1] as usize, f[2] as usize))
            .collect();

        let mut mesh = Mesh::new(self.name.clone(), vertices, faces);
        mesh.validate()?;
        mesh.transform_mut()
            .set_position(Vec3::from(self.position))
            .set_rotation(Vec3::from(self.rotation));
        Ok(mesh)
    }
}

/// Parses scene text. Texture paths resolve against `base_dir`.
pub fn parse_scene(source: &str, base_dir: &Path) -> Result<Vec<Mesh>, LoadError> {
    let scene: SceneFile = ron::from_str(source)?;

    let mut meshes = Vec::with_capacity(scene.meshes.len());
    for description in &scene.meshes {
        let mut mesh = description.to_mesh()?;
        if let Some(texture) = &description.texture {
            mesh.set_texture(Texture::from_file(base_dir.join(texture))?);
        }
        log::debug!(
            "Decoded mesh '{}' ({} vertices, {} faces, uv_count {})",
            mesh.name(),
            mesh.vertices().len(),
            mesh.faces().len(),
            description.uv_count
        );
        meshes.push(mesh);
    }
    Ok(meshes)
}

/// Loads every mesh of a `.ron` scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let meshes = parse_scene(&source, base_dir)?;
    log::info!("Loaded {} meshes from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Loads meshes from a `.ron` scene or an `.obj` model, by extension.
pub fn load_meshes<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, LoadError> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => load_scene(path),
        Some("obj") => {
            let meshes = Mesh::load_all_from_obj(path)?;
            log::info!("Loaded {} meshes from {}", meshes.len(), path.display());
            Ok(meshes)
        }
        _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
    }
}
