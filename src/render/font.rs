//! System font discovery for ring text.
//!
//! The layouter draws text glyphs in bold at a caller-chosen size. The font
//! itself comes from the host: [`FontStore::system`] asks the system font
//! database for a bold sans-serif face, walking down to any usable face when
//! bold is unavailable. Emoji never go through the store; they are resolved
//! as color glyphs by the [`emoji`](super::emoji) module.

use resvg::usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight, ID};
use rusttype::Font;
use tracing::{debug, warn};

/// The font used for text glyph measurement and rasterization.
///
/// A store may be empty (no usable system font, no caller-supplied bytes);
/// rendering then degrades to emoji-only output instead of failing.
pub struct FontStore {
    font: Option<Font<'static>>,
}

impl FontStore {
    /// Discovers a bold sans-serif face from the system font database.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();

        let font = pick_face(&db);
        if font.is_none() {
            warn!("no usable system font found; ring text will render emoji only");
        }
        Self { font }
    }

    /// Builds a store from raw TTF/OTF bytes supplied by the caller.
    ///
    /// Returns `None` if the bytes are not a parseable font.
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        let font = Font::try_from_vec(data)?;
        Some(Self { font: Some(font) })
    }

    /// A store with no font at all. Text clusters measure zero and draw
    /// nothing; emoji still render.
    pub fn empty() -> Self {
        Self { font: None }
    }

    /// Whether a text font is available.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub(crate) fn font(&self) -> Option<&Font<'static>> {
        self.font.as_ref()
    }
}

fn pick_face(db: &Database) -> Option<Font<'static>> {
    let preferences = [
        Query {
            families: &[Family::SansSerif],
            weight: Weight::BOLD,
            stretch: Stretch::Normal,
            style: Style::Normal,
        },
        Query {
            families: &[Family::SansSerif],
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        },
    ];

    for query in &preferences {
        if let Some(id) = db.query(query) {
            if let Some(font) = load_face(db, id) {
                debug!(weight = query.weight.0, "loaded sans-serif face");
                return Some(font);
            }
        }
    }

    // Last resort: any face the database knows about.
    for info in db.faces() {
        if let Some(font) = load_face(db, info.id) {
            debug!("loaded fallback face");
            return Some(font);
        }
    }
    None
}

fn load_face(db: &Database, id: ID) -> Option<Font<'static>> {
    db.with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })?
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_store_never_panics() {
        let store = FontStore::system();
        // Font availability depends on the host; both outcomes are valid.
        let _ = store.has_font();
    }

    #[test]
    fn empty_store_has_no_font() {
        assert!(!FontStore::empty().has_font());
    }

    #[test]
    fn from_bytes_rejects_non_font_data() {
        assert!(FontStore::from_bytes(b"not a font".to_vec()).is_none());
    }
}
