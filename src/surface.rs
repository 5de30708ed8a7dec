//! Presentation targets for finished frames.
//!
//! A [`PresentTarget`] receives the raw B,G,R,A color buffer once per frame.
//! The SDL2 [`Window`](crate::window::Window) is one; [`ImageSurface`] keeps the
//! frame in memory for headless rendering, screenshots and tests.

use std::convert::Infallible;
use std::path::Path;

use image::{ImageError, RgbaImage};

/// Something a finished color buffer can be handed to.
pub trait PresentTarget {
    type Error;

    /// Takes a full `width * height * 4` B,G,R,A buffer, row-major.
    fn present(&mut self, bgra: &[u8], width: u32, height: u32) -> Result<(), Self::Error>;
}

/// In-memory copy of the last presented frame.
#[derive(Debug, Clone, Default)]
pub struct ImageSurface {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The last presented frame, B,G,R,A.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Converts the last frame to an RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let rgba = self
            .bytes
            .chunks_exact(4)
            .flat_map(|p| [p[2], p[1], p[0], p[3]])
            .collect();
        // The buffer length always matches the dimensions it was presented with.
        RgbaImage::from_raw(self.width, self.height, rgba).unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Writes the last frame as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let path = path.as_ref();
        self.to_rgba_image().save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl PresentTarget for ImageSurface {
    type Error = Infallible;

    fn present(&mut self, bgra: &[u8], width: u32, height: u32) -> Result<(), Self::Error> {
        self.bytes.clear();
        self.bytes.extend_from_slice(bgra);
        self.width = width;
        self.height = height;
        Ok(())
    }
}
