use std::path::Path;

use crate::colors::Color4;
use crate::mesh::LoadError;

/// Represents a 2D texture for texture mapping.
///
/// Texels are stored row-major as B,G,R,A bytes, the same layout as the
/// color buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    data: Vec<u8>, // B,G,R,A per texel
    width: u32,
    height: u32,
}

impl Texture {
    /// Wraps a ready B,G,R,A pixel array.
    ///
    /// Fails when the array length is not `width * height * 4` or a dimension is zero.
    pub fn from_bgra(width: u32, height: u32, data: Vec<u8>) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(LoadError::TextureSize {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        // RGBA -> BGRA
        let data: Vec<u8> = img
            .pixels()
            .flat_map(|p| {
                let [r, g, b, a] = p.0;
                [b, g, r, a]
            })
            .collect();

        log::debug!("Loaded texture {} ({}x{})", path.display(), width, height);
        Self::from_bgra(width, height, data)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// UVs outside `[0, 1)` repeat. Texel coordinates are
    /// `|trunc(u * width) mod width|` and likewise for `v`, so negative
    /// coordinates mirror around zero rather than wrapping euclidean-style.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Color4 {
        let tx = wrap(u, self.width);
        let ty = wrap(v, self.height);

        let pos = (tx + ty * self.width as usize) * 4;
        Color4::from_bgra([
            self.data[pos],
            self.data[pos + 1],
            self.data[pos + 2],
            self.data[pos + 3],
        ])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[inline]
fn wrap(coordinate: f32, size: u32) -> usize {
    let size = size as i64;
    ((coordinate * size as f32) as i64 % size).unsigned_abs() as usize
}

/// Samples `texture` or returns opaque white when no texture is bound.
#[inline]
pub fn sample(texture: Option<&Texture>, u: f32, v: f32) -> Color4 {
    match texture {
        Some(texture) => texture.sample(u, v),
        None => Color4::WHITE,
    }
}
