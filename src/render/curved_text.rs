//! Text curved along the ring arc.
//!
//! There is no native text-on-a-path rasterization, so the layouter builds
//! it glyph by glyph: split the string into user-perceived characters,
//! measure each one's advance width, convert that width to arc length, and
//! draw every character independently rotated so its baseline lies on the
//! circle's tangent. Splitting by grapheme cluster (not by code unit) is
//! what keeps flag and ZWJ emoji intact as single glyphs.

use std::f32::consts::FRAC_PI_2;

use resvg::tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};
use rusttype::{point, Font, PositionedGlyph, Scale};
use unicode_segmentation::UnicodeSegmentation;

use super::emoji;
use super::font::FontStore;
use super::Surface;
use crate::theme::Color;

// ============================================================================
// Layout
// ============================================================================

/// One user-perceived character positioned on the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCluster {
    /// The grapheme cluster, possibly spanning multiple code points.
    pub cluster: String,

    /// Measured advance width in logical pixels.
    pub advance: f32,

    /// Arc length consumed by the cluster, in radians: `advance / radius`.
    pub angular_width: f32,

    /// Angle of the cluster's center, in radians.
    pub center_angle: f32,
}

/// Measures `text` and assigns each cluster its angular slot, walking from
/// `start_angle` in the decreasing-angle direction (the ring's sweep
/// direction, so text follows the arc from its start point).
///
/// This is the pure half of the layouter: no drawing, no surface. A string
/// wider than the available arc keeps walking past the arc's end and wraps
/// over earlier slots; nothing is clipped.
pub fn layout_arc(
    text: &str,
    radius: f32,
    start_angle: f32,
    font_size: f32,
    fonts: &FontStore,
) -> Vec<PlacedCluster> {
    if text.is_empty() || radius <= 0.0 {
        return Vec::new();
    }

    let mut current = start_angle;
    let mut placed = Vec::new();
    for cluster in text.graphemes(true) {
        let advance = measure_cluster(cluster, font_size, fonts);
        let angular_width = advance / radius;
        placed.push(PlacedCluster {
            cluster: cluster.to_string(),
            advance,
            angular_width,
            center_angle: current - angular_width / 2.0,
        });
        current -= angular_width;
    }
    placed
}

/// Draws `text` along the circle of `radius` centered at (`cx`, `cy`),
/// starting at `start_angle` and sweeping toward decreasing angles.
///
/// Each glyph is composed with its own transform — translate to the center,
/// rotate by (center angle − 90°) so local "up" points outward along the
/// radius, translate out by the radius, draw centered — so no transform
/// state carries over between characters. Empty text is a no-op.
pub fn draw_curved_text(
    surface: &mut Surface,
    text: &str,
    radius: f32,
    cx: f32,
    cy: f32,
    start_angle: f32,
    color: Color,
    font_size: f32,
    fonts: &FontStore,
) {
    if text.is_empty() {
        return;
    }

    let base = surface.transform();
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };

    for placed in layout_arc(text, radius, start_angle, font_size, fonts) {
        let Some(glyph) = raster_cluster(&placed.cluster, font_size, color, fonts) else {
            continue;
        };
        let rotation = (placed.center_angle - FRAC_PI_2).to_degrees();
        let transform = base
            .pre_concat(Transform::from_translate(cx, cy))
            .pre_concat(Transform::from_rotate(rotation))
            .pre_concat(Transform::from_translate(0.0, radius))
            .pre_concat(Transform::from_translate(
                -(glyph.width() as f32) / 2.0,
                -(glyph.height() as f32) / 2.0,
            ));
        surface
            .pixmap_mut()
            .draw_pixmap(0, 0, glyph.as_ref(), &paint, transform, None);
    }
}

// ============================================================================
// Measurement and rasterization
// ============================================================================

/// The advance width of one cluster at the given pixel size.
///
/// Emoji occupy a square em; text clusters use the font's advance widths.
/// Without a font, text clusters measure zero (and draw nothing).
fn measure_cluster(cluster: &str, font_size: f32, fonts: &FontStore) -> f32 {
    if emoji::resolve(cluster).is_some() {
        return font_size;
    }
    let Some(font) = fonts.font() else {
        return 0.0;
    };
    let scale = Scale::uniform(font_size);
    font.layout(cluster, scale, point(0.0, 0.0))
        .map(|g| g.unpositioned().h_metrics().advance_width)
        .sum()
}

/// Rasterizes one cluster into its own small pixmap, ready to be composed
/// with a per-glyph transform. Returns `None` when there is nothing to draw.
fn raster_cluster(cluster: &str, font_size: f32, color: Color, fonts: &FontStore) -> Option<Pixmap> {
    if let Some(svg) = emoji::resolve(cluster) {
        return emoji::render(svg, font_size);
    }
    raster_text_cluster(fonts.font()?, cluster, font_size, color)
}

/// Draws a text cluster into a pixmap spanning its advance width and em box,
/// with the glyphs on the font baseline. The em box is what the caller
/// centers on, approximating middle vertical alignment.
fn raster_text_cluster(
    font: &Font<'static>,
    cluster: &str,
    font_size: f32,
    color: Color,
) -> Option<Pixmap> {
    let scale = Scale::uniform(font_size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(cluster, scale, point(0.0, v_metrics.ascent))
        .collect();

    let advance: f32 = glyphs
        .iter()
        .map(|g| g.unpositioned().h_metrics().advance_width)
        .sum();
    if advance <= 0.0 {
        return None;
    }

    let width = advance.ceil().max(1.0) as u32;
    let height = (v_metrics.ascent - v_metrics.descent).ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height)?;

    let w = width as i32;
    let h = height as i32;
    let pixels = pixmap.pixels_mut();
    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = gx as i32 + bb.min.x;
            let y = gy as i32 + bb.min.y;
            if x < 0 || y < 0 || x >= w || y >= h {
                return;
            }
            let alpha = (coverage * 255.0).round() as u8;
            if alpha == 0 {
                return;
            }
            pixels[(y * w + x) as usize] =
                ColorU8::from_rgba(color.r, color.g, color.b, alpha).premultiply();
        });
    }
    Some(pixmap)
}

// ============================================================================
// Tests
// ============================================================================
