//! Decoded photo handling and cover-fit math.

use std::io::Cursor;

use image::RgbaImage;
use resvg::tiny_skia::Pixmap;
use thiserror::Error;

/// Errors from decoding or encoding a photo.
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to decode photo: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to encode photo: {0}")]
    Encode(image::ImageError),
}

// ============================================================================
// PanOffset
// ============================================================================

/// A pan offset in logical pixels, x right-positive and y down-positive.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PanOffset {
    pub x: f32,
    pub y: f32,
}

impl PanOffset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Photo
// ============================================================================

/// A decoded user photo in RGBA format.
///
/// The photo is supplied by the caller and positioned at render time by the
/// compositor via a cover-fit scale plus zoom and pan; the photo itself is
/// never cropped or resampled in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    data: RgbaImage,
}

impl Photo {
    /// Wraps an already decoded RGBA image.
    pub fn new(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Decodes a photo from encoded bytes (PNG, JPEG, ...).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PhotoError> {
        let data = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { data })
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.data.width()
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.data.height()
    }

    /// The underlying RGBA image.
    pub fn data(&self) -> &RgbaImage {
        &self.data
    }

    /// The scale that makes the photo fully cover a `diameter`-sized square,
    /// cropping the excess: `max(diameter / width, diameter / height)`.
    ///
    /// Returns `None` for a zero-dimension photo, so callers can skip the
    /// draw instead of dividing by zero.
    pub fn cover_scale(&self, diameter: f32) -> Option<f32> {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return None;
        }
        Some((diameter / w as f32).max(diameter / h as f32))
    }

    /// Encodes the photo as lossless PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, PhotoError> {
        let mut bytes = Vec::new();
        self.data
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(PhotoError::Encode)?;
        Ok(bytes)
    }

    /// Converts the photo into a premultiplied pixmap for compositing.
    ///
    /// Returns `None` for a zero-dimension photo.
    pub(crate) fn to_pixmap(&self) -> Option<Pixmap> {
        let mut pixmap = Pixmap::new(self.width(), self.height())?;
        for (src, dst) in self.data.pixels().zip(pixmap.pixels_mut()) {
            let [r, g, b, a] = src.0;
            *dst = resvg::tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Some(pixmap)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn cover_scale_uses_larger_ratio() {
        let photo = Photo::new(RgbaImage::new(100, 200));
        assert_eq!(photo.cover_scale(320.0), Some(3.2));

        let photo = Photo::new(RgbaImage::new(200, 100));
        assert_eq!(photo.cover_scale(320.0), Some(3.2));
    }

    #[test]
    fn cover_scale_covers_target_square() {
        // Cover-fit invariant: scale * min(dimension) >= diameter.
        for (w, h) in [(10u32, 1000u32), (333, 17), (320, 320), (1, 1)] {
            let photo = Photo::new(RgbaImage::new(w, h));
            let scale = photo.cover_scale(320.0).unwrap();
            assert!(scale * w.min(h) as f32 >= 320.0 - f32::EPSILON);
        }
    }

    #[test]
    fn cover_scale_zero_dimension_is_none() {
        let photo = Photo::new(RgbaImage::new(0, 10));
        assert_eq!(photo.cover_scale(320.0), None);
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        assert!(Photo::from_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn from_bytes_decodes_encoded_photo() {
        let src = Photo::new(RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 255])));
        let decoded = Photo::from_bytes(&src.encode_png().unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
        assert_eq!(decoded.data().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn to_pixmap_premultiplies() {
        let photo = Photo::new(RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 128])));
        let pixmap = photo.to_pixmap().unwrap();
        let px = pixmap.pixel(0, 0).unwrap();
        assert_eq!(px.alpha(), 128);
        assert!(px.red() < 200, "premultiplied red should be scaled by alpha");
    }
}
