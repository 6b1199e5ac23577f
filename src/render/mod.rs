//! The rendering pipeline: a raster surface plus the two passes drawn onto
//! it — the frame compositor and the curved text layouter.
//!
//! Both passes are pure functions of their arguments and mutate the surface
//! in place; nothing is cached between renders.

pub mod compositor;
pub mod curved_text;
pub mod emoji;
pub mod font;

use std::io::Cursor;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use thiserror::Error;

/// Errors from encoding a rendered surface.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("failed to encode surface as PNG: {0}")]
    Encode(#[from] image::ImageError),
}

// ============================================================================
// Surface
// ============================================================================

/// A square raster surface of fixed logical size, optionally backed by a
/// larger pixel buffer for sharp output on high-density displays.
///
/// All drawing coordinates are logical units; the device-scale factor is
/// applied internally.
pub struct Surface {
    pixmap: Pixmap,
    scale: f32,
}

impl Surface {
    /// The logical edge length of every surface, in pixels.
    pub const SIZE: u32 = 400;

    /// Creates a surface at 1:1 device scale.
    pub fn new() -> Self {
        Self::with_scale(1.0)
    }

    /// Creates a surface whose pixel buffer is `scale` times the logical
    /// size. Non-positive or non-finite scales fall back to 1.0.
    pub fn with_scale(scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let px = (Self::SIZE as f32 * scale).round().max(1.0) as u32;
        // Infallible: px >= 1 and well under tiny-skia's dimension limit.
        let pixmap = Pixmap::new(px, px).expect("surface allocation");
        Self { pixmap, scale }
    }

    /// The device-scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The edge length of the backing pixel buffer.
    pub fn pixel_size(&self) -> u32 {
        self.pixmap.width()
    }

    /// The logical-to-device transform every draw call composes with.
    pub(crate) fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Samples the straight-alpha color under a logical coordinate.
    ///
    /// Returns `None` outside the surface.
    pub fn pixel(&self, x: f32, y: f32) -> Option<[u8; 4]> {
        let px = (x * self.scale).floor();
        let py = (y * self.scale).floor();
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let c = self.pixmap.pixel(px as u32, py as u32)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copies the surface into a straight-alpha RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let mut img = RgbaImage::new(w, h);
        for (src, dst) in self.pixmap.pixels().iter().zip(img.pixels_mut()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }

    /// Encodes the surface as lossless PNG bytes at full quality.
    pub fn encode_png(&self) -> Result<Vec<u8>, PngError> {
        let img = self.to_rgba_image();
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
