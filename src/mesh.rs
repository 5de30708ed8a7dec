//! Mesh geometry: vertices, index-triple faces and loaders.
//!
//! A [`Mesh`] owns fixed-size vertex and face arrays that are never resized after
//! construction. Only its [`Transform`] (position and rotation) changes between
//! frames, driven by whoever owns the scene.

use std::path::Path;

use thiserror::Error;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;
use crate::transform::Transform;

/// Errors produced while loading meshes, scenes and textures.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("scene parse error: {0}")]
    Scene(#[from] ron::error::SpannedError),
    #[error("texture decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("mesh '{mesh}': unsupported uv channel count {uv_count} (expected 0, 1 or 2)")]
    UnsupportedUvCount { mesh: String, uv_count: u32 },
    #[error("mesh '{mesh}': {len} vertex floats is not a multiple of the vertex step {step}")]
    IncompleteVertices { mesh: String, len: usize, step: usize },
    #[error("mesh '{mesh}': {len} indices is not a multiple of 3")]
    IncompleteFaces { mesh: String, len: usize },
    #[error("mesh '{mesh}': face {face} references vertex {index} but only {vertex_count} exist")]
    FaceIndexOutOfBounds {
        mesh: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("texture {width}x{height} expects width * height * 4 bytes, got {len}")]
    TextureSize { width: u32, height: u32, len: usize },
    #[error("unsupported scene file: {0}")]
    UnsupportedFormat(String),
}

/// A mesh vertex in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub coordinates: Vec3,
    pub normal: Vec3,
    pub uv: Option<Vec2>,
}

impl Vertex {
    pub const fn new(coordinates: Vec3, normal: Vec3) -> Self {
        Self {
            coordinates,
            normal,
            uv: None,
        }
    }

    pub const fn with_uv(coordinates: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            coordinates,
            normal,
            uv: Some(uv),
        }
    }
}

/// A triangle as three zero-based indices into the owning mesh's vertex array.
///
/// Winding is preserved but never used for culling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    transform: Transform,
    texture: Option<Texture>,
}

impl Mesh {
    /// Creates a mesh at the origin with no rotation.
    ///
    /// Face indices are not checked here; loaders call [`Mesh::validate`].
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
            transform: Transform::default(),
            texture: None,
        }
    }

    /// Unit cube centered on the origin with flat per-face normals and UVs.
    pub fn cube() -> Self {
        // (normal, tangent u, tangent v) per side
        const SIDES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, -1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, 1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut faces = Vec::with_capacity(12);
        for (normal, u_axis, v_axis) in SIDES {
            let (n, u, v) = (Vec3::from(normal), Vec3::from(u_axis), Vec3::from(v_axis));
            let base = vertices.len();
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let position = n + u * su + v * sv;
                let uv = Vec2::new((su + 1.0) / 2.0, (1.0 - sv) / 2.0);
                vertices.push(Vertex::with_uv(position, n, uv));
            }
            faces.push(Face::new(base, base + 1, base + 2));
            faces.push(Face::new(base, base + 2, base + 3));
        }

        Self::new("Cube", vertices, faces)
    }

    /// Load the first object of an OBJ file.
    pub fn from_obj<P: AsRef<Path>>(file_path: P) -> Result<Self, LoadError> {
        let mut meshes = Self::load_all_from_obj(&file_path)?;
        if meshes.is_empty() {
            return Err(LoadError::UnsupportedFormat(format!(
                "{} contains no objects",
                file_path.as_ref().display()
            )));
        }
        Ok(meshes.swap_remove(0))
    }

    /// Load every object/group of an OBJ file as a separate mesh.
    ///
    /// Faces are triangulated. Objects without normals get smooth normals
    /// accumulated from their faces.
    pub fn load_all_from_obj<P: AsRef<Path>>(file_path: P) -> Result<Vec<Self>, LoadError> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(file_path.as_ref(), &options)?;

        let mut meshes = Vec::with_capacity(models.len());
        for model in models {
            let obj = &model.mesh;
            let vertex_count = obj.positions.len() / 3;
            let has_normals = obj.normals.len() == obj.positions.len();
            let has_uvs = obj.texcoords.len() / 2 == vertex_count;

            let vertices = (0..vertex_count)
                .map(|i| {
                    let coordinates = Vec3::new(
                        obj.positions[i * 3],
                        obj.positions[i * 3 + 1],
                        obj.positions[i * 3 + 2],
                    );
                    let normal = if has_normals {
                        Vec3::new(
                            obj.normals[i * 3],
                            obj.normals[i * 3 + 1],
                            obj.normals[i * 3 + 2],
                        )
                    } else {
                        Vec3::ZERO
                    };
                    let uv = has_uvs
                        .then(|| Vec2::new(obj.texcoords[i * 2], obj.texcoords[i * 2 + 1]));
                    Vertex {
                        coordinates,
                        normal,
                        uv,
                    }
                })
                .collect();

            let faces = obj
                .indices
                .chunks_exact(3)
                .map(|tri| Face::new(tri[0] as usize, tri[1] as usize, tri[2] as usize))
                .collect();

            let mut mesh = Self::new(model.name, vertices, faces);
            mesh.validate()?;
            if !has_normals {
                mesh.compute_normals();
            }
            log::debug!(
                "Loaded OBJ mesh '{}' ({} vertices, {} faces)",
                mesh.name,
                mesh.vertices.len(),
                mesh.faces.len()
            );
            meshes.push(mesh);
        }

        Ok(meshes)
    }

    /// Checks that every face index addresses an existing vertex.
    pub fn validate(&self) -> Result<(), LoadError> {
        let vertex_count = self.vertices.len();
        for (face, f) in self.faces.iter().enumerate() {
            if let Some(&index) = f.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(LoadError::FaceIndexOutOfBounds {
                    mesh: self.name.clone(),
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Replaces vertex normals with the normalized sum of adjacent face normals.
    pub fn compute_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for face in &self.faces {
            let [a, b, c] = face.indices();
            let pa = self.vertices[a].coordinates;
            let normal = (self.vertices[b].coordinates - pa).cross(self.vertices[c].coordinates - pa);
            for i in [a, b, c] {
                sums[i] = sums[i] + normal;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            if sum.magnitude() > f32::EPSILON {
                vertex.normal = sum.normalize();
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }
}
