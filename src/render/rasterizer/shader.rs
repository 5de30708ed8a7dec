//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage, depth and attribute interpolation; a shader
//! turns the interpolated attributes of one pixel into its final color.

use crate::colors::Color4;
use crate::math::vec2::Vec2;
use crate::texture::{self, Texture};

/// Interpolated attributes of one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub intensity: f32,
    pub uv: Vec2,
}

/// Trait for per-pixel shading computations.
pub trait PixelShader {
    fn shade(&self, fragment: &Fragment) -> Color4;
}

/// Face color scaled by the light intensity.
pub struct SolidShader {
    color: Color4,
}

impl SolidShader {
    pub fn new(color: Color4) -> Self {
        Self { color }
    }
}

impl PixelShader for SolidShader {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> Color4 {
        self.color.scale(fragment.intensity)
    }
}

/// Texture sample modulated by the face color and the light intensity.
///
/// With no texture bound the sample is white, which degrades to [`SolidShader`].
pub struct TextureShader<'a> {
    texture: Option<&'a Texture>,
    color: Color4,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: Option<&'a Texture>, color: Color4) -> Self {
        Self { texture, color }
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> Color4 {
        let texel = texture::sample(self.texture, fragment.uv.x, fragment.uv.y);
        self.color.modulate(texel).scale(fragment.intensity)
    }
}
