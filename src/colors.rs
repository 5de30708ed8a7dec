//! Normalized RGBA colors and their B,G,R,A byte encoding.
//!
//! Colors flow through the pipeline as [`Color4`] (components in `[0, 1]`) and
//! are only quantized to bytes when a pixel is written to the color buffer.

use serde::{Deserialize, Serialize};

/// RGBA color with floating point components, nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray of the given level.
    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level, 1.0)
    }

    /// Decodes a texel or pixel stored as B,G,R,A bytes.
    pub fn from_bgra([b, g, r, a]: [u8; 4]) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Encodes as B,G,R,A bytes. Out of range components saturate.
    pub fn to_bgra(self) -> [u8; 4] {
        [
            to_byte(self.b),
            to_byte(self.g),
            to_byte(self.r),
            to_byte(self.a),
        ]
    }

    /// Scales every component, alpha included, by a light intensity.
    #[inline]
    pub fn scale(self, intensity: f32) -> Self {
        Self::new(
            self.r * intensity,
            self.g * intensity,
            self.b * intensity,
            self.a * intensity,
        )
    }

    /// Component-wise product, alpha included.
    #[inline]
    pub fn modulate(self, other: Self) -> Self {
        Self::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }
}

impl Default for Color4 {
    fn default() -> Self {
        Self::WHITE
    }
}

#[inline]
fn to_byte(component: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    (component * 255.0) as u8
}
