//! The frame compositor: background, circular-clipped photo, ring arc.

use kurbo::{Arc, PathEl, Shape};
use resvg::tiny_skia::{
    FillRule, FilterQuality, GradientStop, LineCap, Mask, Paint, Path, PathBuilder, PixmapPaint,
    Point, RadialGradient, Rect, SpreadMode, Stroke, Transform,
};
use tracing::debug;

use super::Surface;
use crate::photo::{PanOffset, Photo};
use crate::theme::{Color, Theme};

/// Radius of the circular avatar area, in logical pixels.
pub const AVATAR_RADIUS: f32 = 160.0;

/// Stroke width of the ring band, in logical pixels.
pub const RING_WIDTH: f32 = 40.0;

/// Where the ring arc begins: 210°, the 10 o'clock position. Angles are
/// measured from the positive x-axis, increasing clockwise in raster space.
pub const RING_START_ANGLE: f32 = 210.0 * std::f32::consts::PI / 180.0;

/// Where the ring arc ends: 0°, the 3 o'clock position.
pub const RING_END_ANGLE: f32 = 0.0;

/// Radius of the inner radial-gradient stop, in logical pixels.
const GRADIENT_INNER_RADIUS: f32 = 10.0;

/// Draws the full frame: white fill, optional radial background, the
/// circular-clipped photo (or a gray placeholder), and the ring arc.
///
/// The surface is mutated in place. There is no failure path; every
/// degenerate input (no photo, zero-dimension photo, zero zoom) draws a
/// well-defined reduced result instead of erroring.
pub fn draw_frame(
    surface: &mut Surface,
    photo: Option<&Photo>,
    zoom: f32,
    pan: PanOffset,
    ring_color: Color,
    show_radial_background: bool,
    theme: &Theme,
) {
    let size = Surface::SIZE as f32;
    let center = size / 2.0;
    let ts = surface.transform();

    surface.pixmap_mut().fill(Color::WHITE.to_tiny());

    if show_radial_background {
        fill_radial_background(surface, theme, center, size);
    }

    let Some(circle) = circle_path(center, center, AVATAR_RADIUS) else {
        return;
    };

    match photo {
        Some(photo) => draw_photo(surface, photo, zoom, pan, &circle),
        None => {
            let mut paint = Paint::default();
            paint.set_color(Color::PLACEHOLDER_GRAY.to_tiny());
            paint.anti_alias = true;
            surface
                .pixmap_mut()
                .fill_path(&circle, &paint, FillRule::Winding, ts, None);
        }
    }

    if let Some(arc) = ring_arc_path(center, center, AVATAR_RADIUS) {
        let mut paint = Paint::default();
        paint.set_color(ring_color.to_tiny());
        paint.anti_alias = true;
        let stroke = Stroke {
            width: RING_WIDTH,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        surface.pixmap_mut().stroke_path(&arc, &paint, &stroke, ts, None);
    }
}

/// Paints the theme's radial gradient over the whole surface: secondary
/// color inside [`GRADIENT_INNER_RADIUS`], blending to primary at the
/// surface edge length.
fn fill_radial_background(surface: &mut Surface, theme: &Theme, center: f32, size: f32) {
    let ts = surface.transform();
    let stops = vec![
        GradientStop::new(0.0, theme.secondary().to_tiny()),
        GradientStop::new(GRADIENT_INNER_RADIUS / size, theme.secondary().to_tiny()),
        GradientStop::new(1.0, theme.primary().to_tiny()),
    ];
    let Some(shader) = RadialGradient::new(
        Point::from_xy(center, center),
        Point::from_xy(center, center),
        size,
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    ) else {
        return;
    };

    let mut paint = Paint::default();
    paint.shader = shader;
    paint.anti_alias = true;
    if let Some(rect) = Rect::from_xywh(0.0, 0.0, size, size) {
        surface.pixmap_mut().fill_rect(rect, &paint, ts, None);
    }
}

/// Draws the photo cover-fit scaled and zoomed/panned, clipped to `clip`.
fn draw_photo(surface: &mut Surface, photo: &Photo, zoom: f32, pan: PanOffset, clip: &Path) {
    let Some(base) = photo.cover_scale(2.0 * AVATAR_RADIUS) else {
        debug!("skipping zero-dimension photo");
        return;
    };
    let scale = base * zoom.max(0.0);
    if scale <= 0.0 {
        return;
    }
    let Some(pixmap) = photo.to_pixmap() else {
        return;
    };

    let center = Surface::SIZE as f32 / 2.0;
    let draw_w = photo.width() as f32 * scale;
    let draw_h = photo.height() as f32 * scale;
    let x = center - draw_w / 2.0 + pan.x;
    let y = center - draw_h / 2.0 + pan.y;

    let px_size = surface.pixel_size();
    let Some(mut mask) = Mask::new(px_size, px_size) else {
        return;
    };
    let ts = surface.transform();
    mask.fill_path(clip, FillRule::Winding, true, ts);

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let transform = ts
        .pre_concat(Transform::from_translate(x, y))
        .pre_concat(Transform::from_scale(scale, scale));
    surface
        .pixmap_mut()
        .draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, Some(&mask));
}

fn circle_path(cx: f32, cy: f32, r: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.push_circle(cx, cy, r);
    pb.finish()
}

/// The ring arc from [`RING_START_ANGLE`] swept down to [`RING_END_ANGLE`],
/// passing through the left, bottom, and right of the circle and leaving the
/// top open. Flattened to cubic Béziers.
fn ring_arc_path(cx: f32, cy: f32, r: f32) -> Option<Path> {
    let arc = Arc::new(
        kurbo::Point::new(cx as f64, cy as f64),
        kurbo::Vec2::new(r as f64, r as f64),
        RING_START_ANGLE as f64,
        (RING_END_ANGLE - RING_START_ANGLE) as f64,
        0.0,
    );

    let mut pb = PathBuilder::new();
    for el in arc.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

// ============================================================================
// Tests
// ============================================================================
