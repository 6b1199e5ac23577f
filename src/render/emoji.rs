//! Color emoji rasterization via Twemoji assets.
//!
//! Text fonts rarely carry color glyphs, so pictographic clusters are
//! resolved to their Twemoji SVG and rasterized with resvg instead of going
//! through the text font. This mirrors the emoji-capable fallback at the end
//! of a CSS font stack: any cluster Twemoji knows is an emoji, everything
//! else is a text glyph.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use twemoji_assets::svg::SvgTwemojiAsset;

/// Resolves a grapheme cluster to Twemoji SVG markup, if it is an emoji.
///
/// The lookup tolerates a missing or extra emoji presentation selector
/// (U+FE0F), which text input fields add or drop inconsistently.
pub(crate) fn resolve(cluster: &str) -> Option<&'static str> {
    if let Some(asset) = SvgTwemojiAsset::from_emoji(cluster) {
        return Some(asset.as_ref());
    }

    let stripped: String = cluster.chars().filter(|c| *c != '\u{fe0f}').collect();
    if stripped != cluster {
        if let Some(asset) = SvgTwemojiAsset::from_emoji(&stripped) {
            return Some(asset.as_ref());
        }
    }

    let qualified = format!("{cluster}\u{fe0f}");
    SvgTwemojiAsset::from_emoji(&qualified).map(|asset| asset.as_ref())
}

/// Rasterizes emoji SVG markup so its larger dimension equals `size` pixels.
///
/// Returns `None` if the markup cannot be parsed or `size` is degenerate.
pub(crate) fn render(svg_data: &str, size: f32) -> Option<Pixmap> {
    if !size.is_finite() || size <= 0.0 {
        return None;
    }

    let tree = Tree::from_str(svg_data, &Options::default()).ok()?;
    let svg_size = tree.size();
    let scale = size / svg_size.width().max(svg_size.height());

    let width = (svg_size.width() * scale).ceil().max(1.0) as u32;
    let height = (svg_size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Some(pixmap)
}

// ============================================================================
// Tests
// ============================================================================
