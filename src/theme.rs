//! Theme catalog and color handling for ring frames.
//!
//! A [`Theme`] bundles the colors, default ring text, and optional icon
//! glyph for one frame style. Themes live in an ordered [`ThemeCatalog`];
//! lookup by id falls back to the first entry so rendering never has to
//! deal with a missing theme.

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// Emoji offered by front-ends for quick insertion into the ring text.
pub const EMOJI_SUGGESTIONS: [&str; 12] = [
    "🎅", "🎄", "❄️", "🎁", "🦃", "🍂", "🥧", "💼", "🚀", "✨", "👋", "⭐",
];

// ============================================================================
// Color
// ============================================================================

/// An opaque sRGB color.
///
/// Theme records carry colors as CSS-style strings; this is the parsed form
/// the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// The placeholder fill used inside the avatar circle when no photo is set.
    pub const PLACEHOLDER_GRAY: Color = Color::new(0xe5, 0xe7, 0xeb);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a CSS-style color string.
    ///
    /// Accepts `#rrggbb`, `#rgb` (with or without the leading `#`) and the
    /// functional `rgb(r, g, b)` form. Returns `None` for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// use halo_renderer::Color;
    ///
    /// assert_eq!(Color::parse("#DC2626"), Some(Color::new(220, 38, 38)));
    /// assert_eq!(Color::parse("rgb(0, 0, 0)"), Some(Color::BLACK));
    /// assert_eq!(Color::parse("not-a-color"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let mut parts = args.split(',').map(str::trim);
            let r = parts.next()?.parse::<u8>().ok()?;
            let g = parts.next()?.parse::<u8>().ok()?;
            let b = parts.next()?.parse::<u8>().ok()?;
            if parts.next().is_some() {
                return None;
            }
            return Some(Self::new(r, g, b));
        }

        let hex: Srgb<u8> = s.strip_prefix('#').unwrap_or(s).parse().ok()?;
        Some(Self::new(hex.red, hex.green, hex.blue))
    }

    pub(crate) fn to_tiny(self) -> resvg::tiny_skia::Color {
        resvg::tiny_skia::Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

// ============================================================================
// Theme
// ============================================================================

/// A single frame theme.
///
/// The renderer reads the two colors, the default text, and the icon; `name`
/// and `category` exist for front-ends that list and group themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Stable identifier used for lookup and export file names.
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// Grouping label, e.g. "Work" or "Christmas".
    pub category: String,

    /// Ring color and outer radial-gradient stop, as a CSS color string.
    pub primary_color: String,

    /// Inner radial-gradient stop, as a CSS color string.
    pub secondary_color: String,

    /// Ring text used when the user has not typed their own.
    pub default_text: String,

    /// Optional icon glyph appended after the default text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Theme {
    /// Creates a theme without an icon.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        primary_color: impl Into<String>,
        secondary_color: impl Into<String>,
        default_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            primary_color: primary_color.into(),
            secondary_color: secondary_color.into(),
            default_text: default_text.into(),
            icon: None,
        }
    }

    /// Adds an icon glyph to the theme.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// The parsed primary color. Unparseable strings fall back to black.
    pub fn primary(&self) -> Color {
        Color::parse(&self.primary_color).unwrap_or(Color::BLACK)
    }

    /// The parsed secondary color. Unparseable strings fall back to white.
    pub fn secondary(&self) -> Color {
        Color::parse(&self.secondary_color).unwrap_or(Color::WHITE)
    }
}

// ============================================================================
// ThemeCatalog
// ============================================================================

/// An ordered collection of themes.
///
/// The order is meaningful: an unresolved id falls back to the first entry,
/// and front-ends list themes in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Creates a catalog from caller-supplied themes.
    ///
    /// An empty list is replaced by [`ThemeCatalog::builtin`] so that
    /// [`resolve`](Self::resolve) always has a fallback entry.
    pub fn new(themes: Vec<Theme>) -> Self {
        if themes.is_empty() {
            Self::builtin()
        } else {
            Self { themes }
        }
    }

    /// The built-in catalog: two Work, two Thanksgiving, and two Christmas
    /// themes.
    pub fn builtin() -> Self {
        Self {
            themes: vec![
                Theme::new(
                    "hiring",
                    "#HIRING",
                    "Work",
                    "#4B2687",
                    "#ffffff",
                    "#HIRING",
                ),
                Theme::new(
                    "open-to-work",
                    "Open to Work",
                    "Work",
                    "#457B3B",
                    "#ffffff",
                    "#OPEN TO WORK",
                ),
                Theme::new(
                    "thanksgiving-happy",
                    "Happy Thanksgiving",
                    "Thanksgiving",
                    "#D97706",
                    "#FFFBEB",
                    "HAPPY THANKSGIVING",
                )
                .with_icon("🍂"),
                Theme::new(
                    "thanksgiving-hiring",
                    "Now Hiring (Thanksgiving)",
                    "Thanksgiving",
                    "#92400E",
                    "#FEF3C7",
                    "NOW HIRING",
                )
                .with_icon("🦃"),
                Theme::new(
                    "christmas-merry",
                    "Merry Christmas",
                    "Christmas",
                    "#DC2626",
                    "#ffffff",
                    "MERRY CHRISTMAS",
                )
                .with_icon("🎄"),
                Theme::new(
                    "christmas-holidays",
                    "Happy Holidays",
                    "Christmas",
                    "#166534",
                    "#ffffff",
                    "HAPPY HOLIDAYS",
                )
                .with_icon("❄️"),
            ],
        }
    }

    /// Looks up a theme by id, falling back to the first catalog entry.
    pub fn resolve(&self, id: &str) -> &Theme {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .unwrap_or_else(|| self.first())
    }

    /// The first (default) theme.
    pub fn first(&self) -> &Theme {
        &self.themes[0]
    }

    /// All themes in catalog order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Category labels in first-appearance order, without duplicates.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for theme in &self.themes {
            if !out.contains(&theme.category.as_str()) {
                out.push(&theme.category);
            }
        }
        out
    }

    /// Themes belonging to the given category, in catalog order.
    pub fn themes_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Theme> {
        self.themes.iter().filter(move |t| t.category == category)
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_colors() {
        assert_eq!(Color::parse("#DC2626"), Some(Color::new(220, 38, 38)));
        assert_eq!(Color::parse("DC2626"), Some(Color::new(220, 38, 38)));
        assert_eq!(Color::parse("#f00"), Some(Color::new(255, 0, 0)));
        assert_eq!(Color::parse("  #ffffff "), Some(Color::WHITE));
    }

    #[test]
    fn parse_rgb_function() {
        assert_eq!(Color::parse("rgb(0, 0, 0)"), Some(Color::BLACK));
        assert_eq!(Color::parse("rgb(220,38,38)"), Some(Color::new(220, 38, 38)));
        assert_eq!(Color::parse("rgb(1, 2)"), None);
        assert_eq!(Color::parse("rgb(1, 2, 3, 4)"), None);
        assert_eq!(Color::parse("rgb(300, 0, 0)"), None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("   "), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
        assert_eq!(Color::parse("blueish"), None);
    }

    #[test]
    fn builtin_catalog_order() {
        let catalog = ThemeCatalog::builtin();
        let ids: Vec<&str> = catalog.themes().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "hiring",
                "open-to-work",
                "thanksgiving-happy",
                "thanksgiving-hiring",
                "christmas-merry",
                "christmas-holidays",
            ]
        );
    }

    #[test]
    fn resolve_known_id() {
        let catalog = ThemeCatalog::builtin();
        let theme = catalog.resolve("christmas-merry");
        assert_eq!(theme.primary_color, "#DC2626");
        assert_eq!(theme.default_text, "MERRY CHRISTMAS");
        assert_eq!(theme.icon.as_deref(), Some("🎄"));
    }

    #[test]
    fn resolve_unknown_id_falls_back_to_first() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.resolve("no-such-theme").id, "hiring");
    }

    #[test]
    fn empty_catalog_replaced_by_builtin() {
        let catalog = ThemeCatalog::new(Vec::new());
        assert_eq!(catalog.first().id, "hiring");
    }

    #[test]
    fn custom_catalog_preserved() {
        let catalog = ThemeCatalog::new(vec![Theme::new(
            "plain",
            "Plain",
            "Misc",
            "#000000",
            "#ffffff",
            "PLAIN",
        )]);
        assert_eq!(catalog.resolve("anything").id, "plain");
    }

    #[test]
    fn categories_in_order_without_duplicates() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.categories(), ["Work", "Thanksgiving", "Christmas"]);
        assert_eq!(catalog.themes_in("Christmas").count(), 2);
    }

    #[test]
    fn theme_color_accessors_fall_back() {
        let theme = Theme::new("t", "T", "Misc", "nonsense", "also nonsense", "T");
        assert_eq!(theme.primary(), Color::BLACK);
        assert_eq!(theme.secondary(), Color::WHITE);
    }
}
