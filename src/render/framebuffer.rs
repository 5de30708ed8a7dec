//! Color and depth buffers.
//!
//! The color buffer is `width * height * 4` bytes in B,G,R,A order, row-major,
//! pixel `(x, y)` starting at byte `(x + y * width) * 4`. The depth buffer holds
//! one `f32` per pixel.
//!
//! # Depth Buffer
//!
//! Stores the normalized screen-space z of the nearest fragment written so far
//! (smaller is nearer), or `f32::MAX` for untouched pixels. Both buffers are
//! reset together by [`FrameBuffer::clear`].

use crate::colors::Color4;

pub struct FrameBuffer {
    color_buffer: Vec<u8>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![0; size * 4],
            depth_buffer: vec![f32::MAX; size],
            width,
            height,
        }
    }

    /// Reallocates both buffers for new dimensions. Contents are lost.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills every pixel with `(r, g, b, a)` and resets every depth to `f32::MAX`.
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        for pixel in self.color_buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[b, g, r, a]);
        }
        self.depth_buffer.fill(f32::MAX);
    }

    /// Writes a pixel with depth testing.
    ///
    /// The write is discarded when the stored depth is strictly smaller than
    /// `z`; equal depths overwrite, so the last writer wins ties.
    ///
    /// `(x, y)` must be inside the buffer; use [`FrameBuffer::draw_point`]
    /// for unchecked coordinates.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, z: f32, color: Color4) {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let index = (x + y * self.width) as usize;

        if self.depth_buffer[index] < z {
            return;
        }

        self.depth_buffer[index] = z;
        let index4 = index * 4;
        self.color_buffer[index4..index4 + 4].copy_from_slice(&color.to_bgra());
    }

    /// Bounds-checked [`FrameBuffer::put_pixel`]. Pixels outside the buffer are dropped.
    #[inline]
    pub fn draw_point(&mut self, x: i32, y: i32, z: f32, color: Color4) {
        if self.contains(x, y) {
            self.put_pixel(x as u32, y as u32, z, color);
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// B,G,R,A bytes at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if !self.contains(x, y) {
            return None;
        }
        let i = (x as usize + y as usize * self.width as usize) * 4;
        let mut bgra = [0; 4];
        bgra.copy_from_slice(&self.color_buffer[i..i + 4]);
        Some(bgra)
    }

    /// Stored depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.contains(x, y)
            .then(|| self.depth_buffer[x as usize + y as usize * self.width as usize])
    }

    /// The raw color buffer, ready for presentation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.put_pixel(3, 2, 0.25, Color4::RED);
        fb.clear(10, 20, 30, 255);

        for pixel in fb.as_bytes().chunks_exact(4) {
            assert_eq!(pixel, &[30, 20, 10, 255]);
        }
        assert!(fb.depth_buffer().iter().all(|&d| d == f32::MAX));
    }

    #[test]
    fn nearer_write_wins_regardless_of_order() {
        let mut a = FrameBuffer::new(2, 2);
        a.put_pixel(1, 1, 0.3, Color4::RED);
        a.put_pixel(1, 1, 0.7, Color4::BLUE);

        let mut b = FrameBuffer::new(2, 2);
        b.put_pixel(1, 1, 0.7, Color4::BLUE);
        b.put_pixel(1, 1, 0.3, Color4::RED);

        for fb in [&a, &b] {
            assert_eq!(fb.pixel(1, 1), Some(Color4::RED.to_bgra()));
            assert_eq!(fb.depth(1, 1), Some(0.3));
        }
    }

    #[test]
    fn equal_depth_last_writer_wins() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.put_pixel(0, 0, 0.5, Color4::RED);
        fb.put_pixel(0, 0, 0.5, Color4::GREEN);
        assert_eq!(fb.pixel(0, 0), Some(Color4::GREEN.to_bgra()));
    }

    #[test]
    fn out_of_bounds_points_are_dropped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(0, 0, 0, 255);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            fb.draw_point(x, y, 0.0, Color4::WHITE);
        }
        assert!(fb.as_bytes().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn pixel_index_is_row_major() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_pixel(2, 1, 0.0, Color4::WHITE);
        let i = (2 + 3) * 4;
        assert_eq!(&fb.as_bytes()[i..i + 4], &[255, 255, 255, 255]);
    }
}
