//! Raster targets and the triangle rasterizers that write into them.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{Rasterizer, RasterizerDispatcher, RenderMode, ScanlineRasterizer, ShadedVertex, Triangle};
