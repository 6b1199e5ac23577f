//! The frame editor: state, derived ring color and text, rendering, export.

use tracing::debug;

use crate::edit::{edit_prompt, EditError, ImageEditor};
use crate::photo::{PanOffset, Photo};
use crate::profile::EditorProfile;
use crate::render::compositor::{self, AVATAR_RADIUS, RING_START_ANGLE};
use crate::render::curved_text;
use crate::render::font::FontStore;
use crate::render::{PngError, Surface};
use crate::theme::{Color, Theme, ThemeCatalog};

/// Smallest selectable ring text size, in pixels.
pub const MIN_TEXT_SIZE: u32 = 20;

/// Largest selectable ring text size, in pixels.
pub const MAX_TEXT_SIZE: u32 = 60;

const DEFAULT_TEXT_SIZE: u32 = 32;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`EditorProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &EditorProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> EditorProfile;
}

// ============================================================================
// FrameEditor
// ============================================================================

/// Main profile-frame editing engine.
///
/// `FrameEditor` holds the current editing state — photo, zoom, pan, theme,
/// text and color overrides — and derives everything the render pipeline
/// needs from it. Every call to [`render`](Self::render) rebuilds the frame
/// from scratch; nothing is cached between renders, so intermediate states
/// can be dropped freely.
///
/// # Derived state
///
/// - **Ring color**: the custom color override when it parses, else the
///   active theme's primary color.
/// - **Ring text**: the custom text verbatim when its trimmed form is
///   non-empty, else the theme's default text (plus icon) uppercased.
///   Exactly one of the two ever supplies the text.
///
/// # Example
///
/// ```
/// use halo_renderer::{FrameEditor, ThemeCatalog};
///
/// let mut editor = FrameEditor::new(ThemeCatalog::builtin());
/// editor.set_theme("christmas-merry");
/// assert_eq!(editor.ring_text(), "MERRY CHRISTMAS 🎄");
///
/// let surface = editor.render();
/// let png = surface.encode_png().unwrap();
/// assert!(!png.is_empty());
/// ```
pub struct FrameEditor {
    catalog: ThemeCatalog,
    fonts: FontStore,
    photo: Option<Photo>,
    zoom: f32,
    pan: PanOffset,
    theme_id: String,
    custom_text: String,
    custom_color: String,
    text_size: u32,
    show_radial_background: bool,
}

impl FrameEditor {
    /// Creates an editor over the given catalog, discovering system fonts.
    pub fn new(catalog: ThemeCatalog) -> Self {
        Self::with_fonts(catalog, FontStore::system())
    }

    /// Creates an editor with an explicit font store.
    pub fn with_fonts(catalog: ThemeCatalog, fonts: FontStore) -> Self {
        let theme_id = catalog.first().id.clone();
        Self {
            catalog,
            fonts,
            photo: None,
            zoom: 1.0,
            pan: PanOffset::default(),
            theme_id,
            custom_text: String::new(),
            custom_color: String::new(),
            text_size: DEFAULT_TEXT_SIZE,
            show_radial_background: false,
        }
    }

    // ---- State ----

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> PanOffset {
        self.pan
    }

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn custom_color(&self) -> &str {
        &self.custom_color
    }

    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    pub fn show_radial_background(&self) -> bool {
        self.show_radial_background
    }

    /// Loads a new photo and resets zoom and pan for it.
    pub fn set_photo(&mut self, photo: Photo) {
        self.photo = Some(photo);
        self.zoom = 1.0;
        self.pan = PanOffset::default();
    }

    /// Removes the photo; the placeholder fill renders instead.
    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Sets the zoom multiplier. Negative and non-finite values clamp to 0.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() { zoom.max(0.0) } else { 0.0 };
    }

    pub fn set_pan(&mut self, pan: PanOffset) {
        self.pan = pan;
    }

    /// Switches the active theme and clears the custom color and custom
    /// text, so the new theme's defaults take over.
    pub fn set_theme(&mut self, id: impl Into<String>) {
        self.theme_id = id.into();
        self.custom_color.clear();
        self.custom_text.clear();
    }

    /// Sets the user's ring text. Rendered verbatim, case preserved.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
    }

    /// Sets the ring color override as a CSS-style string. Strings that do
    /// not parse leave the theme's primary color in effect.
    pub fn set_custom_color(&mut self, color: impl Into<String>) {
        self.custom_color = color.into();
    }

    /// Sets the ring text size, clamped to [`MIN_TEXT_SIZE`]..=[`MAX_TEXT_SIZE`].
    pub fn set_text_size(&mut self, size: u32) {
        self.text_size = size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE);
    }

    pub fn set_radial_background(&mut self, enabled: bool) {
        self.show_radial_background = enabled;
    }

    // ---- Derived state ----

    /// The active theme, falling back to the catalog's first entry when the
    /// stored id does not resolve.
    pub fn active_theme(&self) -> &Theme {
        self.catalog.resolve(&self.theme_id)
    }

    /// The effective ring color.
    pub fn ring_color(&self) -> Color {
        Color::parse(&self.custom_color).unwrap_or_else(|| self.active_theme().primary())
    }

    /// The effective ring text.
    ///
    /// Custom text wins verbatim when present; otherwise the theme's default
    /// text — with the icon glyph appended after a space — is uppercased.
    pub fn ring_text(&self) -> String {
        if !self.custom_text.trim().is_empty() {
            return self.custom_text.clone();
        }

        let theme = self.active_theme();
        let mut text = theme.default_text.clone();
        if let Some(icon) = &theme.icon {
            text.push(' ');
            text.push_str(icon);
        }
        text.to_uppercase()
    }

    // ---- Rendering and export ----

    /// Renders the current state onto a fresh surface at 1:1 device scale.
    pub fn render(&self) -> Surface {
        self.render_with_scale(1.0)
    }

    /// Renders the current state at the given device-scale factor.
    pub fn render_with_scale(&self, scale: f32) -> Surface {
        let mut surface = Surface::with_scale(scale);
        let theme = self.active_theme();
        debug!(theme = %theme.id, has_photo = self.photo.is_some(), "rendering frame");

        compositor::draw_frame(
            &mut surface,
            self.photo.as_ref(),
            self.zoom,
            self.pan,
            self.ring_color(),
            self.show_radial_background,
            theme,
        );

        let text = self.ring_text();
        if !text.is_empty() {
            let center = Surface::SIZE as f32 / 2.0;
            curved_text::draw_curved_text(
                &mut surface,
                &text,
                AVATAR_RADIUS,
                center,
                center,
                RING_START_ANGLE,
                Color::WHITE,
                self.text_size as f32,
                &self.fonts,
            );
        }
        surface
    }

    /// The deterministic download name for the current state.
    pub fn export_file_name(&self) -> String {
        format!("profile-{}.png", self.theme_id)
    }

    /// Renders and encodes the current state as lossless PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, PngError> {
        self.render().encode_png()
    }

    // ---- AI editing ----

    /// Runs one edit exchange with the collaborator: encode the current
    /// photo as PNG, send it with the wrapped instruction, decode the
    /// result, and swap it in (keeping zoom and pan).
    ///
    /// On any error the current photo is left untouched.
    pub fn apply_ai_edit(
        &mut self,
        editor: &dyn ImageEditor,
        instruction: &str,
    ) -> Result<(), EditError> {
        let photo = self.photo.as_ref().ok_or(EditError::NoPhoto)?;
        let bytes = photo.encode_png()?;

        let prompt = edit_prompt(instruction);
        let edited = editor.edit_image(&bytes, "image/png", &prompt)?;
        if edited.is_empty() {
            return Err(EditError::NoImage);
        }

        let new_photo = Photo::from_bytes(&edited)?;
        debug!(
            width = new_photo.width(),
            height = new_photo.height(),
            "applied AI edit"
        );
        self.photo = Some(new_photo);
        Ok(())
    }
}

impl Configurable for FrameEditor {
    /// Applies a profile's settings to this editor.
    ///
    /// The theme is applied first (which clears the overrides), then the
    /// profile's own overrides land on top. The photo is not part of a
    /// profile and is left as is.
    fn apply_profile(&mut self, profile: &EditorProfile) {
        let theme_id = if profile.theme_id.is_empty() {
            self.catalog.first().id.clone()
        } else {
            profile.theme_id.clone()
        };
        self.set_theme(theme_id);
        self.set_zoom(profile.zoom);
        self.set_pan(profile.pan);
        self.set_custom_text(&profile.custom_text);
        self.set_custom_color(&profile.custom_color);
        self.set_text_size(profile.text_size);
        self.set_radial_background(profile.show_radial_background);
    }

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> EditorProfile {
        EditorProfile {
            zoom: self.zoom,
            pan: self.pan,
            theme_id: self.theme_id.clone(),
            custom_text: self.custom_text.clone(),
            custom_color: self.custom_color.clone(),
            text_size: self.text_size,
            show_radial_background: self.show_radial_background,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use image::{Rgba, RgbaImage};

    fn editor() -> FrameEditor {
        // An empty font store keeps pixel assertions host-independent; the
        // tests below never depend on text glyph rasterization.
        FrameEditor::with_fonts(ThemeCatalog::builtin(), FontStore::empty())
    }

    #[test]
    fn defaults_match_the_first_theme() {
        let editor = editor();
        assert_eq!(editor.theme_id(), "hiring");
        assert_eq!(editor.zoom(), 1.0);
        assert_eq!(editor.text_size(), 32);
        assert!(editor.photo().is_none());
        assert!(!editor.show_radial_background());
    }

    #[test]
    fn ring_text_uses_theme_default_with_icon() {
        let mut editor = editor();
        editor.set_theme("christmas-merry");
        assert_eq!(editor.ring_text(), "MERRY CHRISTMAS 🎄");

        editor.set_theme("thanksgiving-happy");
        assert_eq!(editor.ring_text(), "HAPPY THANKSGIVING 🍂");

        // No icon: just the default text.
        editor.set_theme("hiring");
        assert_eq!(editor.ring_text(), "#HIRING");
    }

    #[test]
    fn default_ring_text_is_uppercased() {
        let catalog = ThemeCatalog::new(vec![Theme::new(
            "lower",
            "Lower",
            "Misc",
            "#000000",
            "#ffffff",
            "hello world",
        )]);
        let editor = FrameEditor::with_fonts(catalog, FontStore::empty());
        assert_eq!(editor.ring_text(), "HELLO WORLD");
    }

    #[test]
    fn custom_ring_text_is_verbatim() {
        let mut editor = editor();
        editor.set_custom_text("🚀 Joining Acme");
        assert_eq!(editor.ring_text(), "🚀 Joining Acme");
    }

    #[test]
    fn whitespace_only_custom_text_falls_back_to_default() {
        let mut editor = editor();
        editor.set_theme("christmas-merry");
        editor.set_custom_text("   ");
        assert_eq!(editor.ring_text(), "MERRY CHRISTMAS 🎄");
    }

    #[test]
    fn ring_color_prefers_parseable_override() {
        let mut editor = editor();
        editor.set_theme("christmas-merry");
        assert_eq!(editor.ring_color(), Color::new(0xDC, 0x26, 0x26));

        editor.set_custom_color("#000000");
        assert_eq!(editor.ring_color(), Color::BLACK);

        editor.set_custom_color("rgb(10, 20, 30)");
        assert_eq!(editor.ring_color(), Color::new(10, 20, 30));

        editor.set_custom_color("not a color");
        assert_eq!(editor.ring_color(), Color::new(0xDC, 0x26, 0x26));
    }

    #[test]
    fn switching_theme_resets_overrides() {
        let mut editor = editor();
        editor.set_custom_text("MY TEXT");
        editor.set_custom_color("#123456");

        editor.set_theme("christmas-holidays");
        assert!(editor.custom_text().is_empty());
        assert!(editor.custom_color().is_empty());
        assert_eq!(editor.ring_text(), "HAPPY HOLIDAYS ❄️");
        assert_eq!(editor.ring_color(), Color::new(0x16, 0x65, 0x34));
    }

    #[test]
    fn unresolved_theme_falls_back_to_first() {
        let mut editor = editor();
        editor.set_theme("does-not-exist");
        assert_eq!(editor.active_theme().id, "hiring");
        // The raw id still drives the export name.
        assert_eq!(editor.export_file_name(), "profile-does-not-exist.png");
    }

    #[test]
    fn loading_a_photo_resets_zoom_and_pan() {
        let mut editor = editor();
        editor.set_zoom(2.5);
        editor.set_pan(PanOffset::new(12.0, -7.0));

        editor.set_photo(Photo::new(RgbaImage::new(8, 8)));
        assert_eq!(editor.zoom(), 1.0);
        assert_eq!(editor.pan(), PanOffset::default());
    }

    #[test]
    fn zoom_and_text_size_are_clamped() {
        let mut editor = editor();
        editor.set_zoom(-1.0);
        assert_eq!(editor.zoom(), 0.0);
        editor.set_zoom(f32::NAN);
        assert_eq!(editor.zoom(), 0.0);

        editor.set_text_size(5);
        assert_eq!(editor.text_size(), MIN_TEXT_SIZE);
        editor.set_text_size(500);
        assert_eq!(editor.text_size(), MAX_TEXT_SIZE);
        editor.set_text_size(44);
        assert_eq!(editor.text_size(), 44);
    }

    #[test]
    fn export_file_name_follows_theme_id() {
        let mut editor = editor();
        editor.set_theme("christmas-merry");
        assert_eq!(editor.export_file_name(), "profile-christmas-merry.png");
    }

    #[test]
    fn export_png_produces_png_bytes() {
        let png = editor().export_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn christmas_scenario_end_to_end() {
        let mut editor = editor();
        editor.set_theme("christmas-merry");

        assert_eq!(editor.ring_text(), "MERRY CHRISTMAS 🎄");
        assert_eq!(editor.ring_color(), Color::new(0xDC, 0x26, 0x26));

        let surface = editor.render();
        // Ring color at the 3 o'clock arc endpoint.
        assert_eq!(surface.pixel(360.0, 200.0), Some([0xDC, 0x26, 0x26, 255]));
        // Placeholder gray inside the avatar circle.
        assert_eq!(surface.pixel(200.0, 200.0), Some([0xe5, 0xe7, 0xeb, 255]));
        // No radial background: the corner stays white.
        assert_eq!(surface.pixel(5.0, 5.0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn black_override_scenario_end_to_end() {
        let mut editor = editor();
        editor.set_custom_text("🚀 JOINING ACME");
        editor.set_custom_color("#000000");

        assert_eq!(editor.ring_text(), "🚀 JOINING ACME");

        let surface = editor.render();
        assert_eq!(surface.pixel(360.0, 200.0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn profile_roundtrip_through_configurable() {
        let mut editor = editor();
        let profile = EditorProfile::new()
            .with_theme("thanksgiving-hiring")
            .with_zoom(1.8)
            .with_pan(PanOffset::new(3.0, 4.0))
            .with_custom_text("GOBBLE")
            .with_custom_color("#92400E")
            .with_text_size(48)
            .with_radial_background(true);

        editor.apply_profile(&profile);
        assert_eq!(editor.theme_id(), "thanksgiving-hiring");
        // Overrides from the profile survive the theme switch reset.
        assert_eq!(editor.custom_text(), "GOBBLE");
        assert_eq!(editor.custom_color(), "#92400E");
        assert_eq!(editor.text_size(), 48);
        assert!(editor.show_radial_background());

        assert_eq!(editor.export_profile(), profile);
    }

    #[test]
    fn profile_with_empty_theme_selects_first() {
        let mut editor = editor();
        editor.set_theme("christmas-merry");
        editor.apply_profile(&EditorProfile::new());
        assert_eq!(editor.theme_id(), "hiring");
    }

    #[test]
    fn ai_edit_replaces_the_photo_and_keeps_zoom() {
        let mut editor = editor();
        editor.set_photo(Photo::new(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]))));
        editor.set_zoom(2.0);

        let replacement = Photo::new(RgbaImage::from_pixel(6, 6, Rgba([9, 9, 9, 255])))
            .encode_png()
            .unwrap();
        let collaborator =
            move |_image: &[u8], _mime: &str, prompt: &str| -> Result<Vec<u8>, EditError> {
                assert!(prompt.contains("Add a Santa hat"));
                Ok(replacement.clone())
            };

        editor.apply_ai_edit(&collaborator, "Add a Santa hat").unwrap();
        assert_eq!(editor.photo().unwrap().width(), 6);
        assert_eq!(editor.zoom(), 2.0, "AI edits keep the current framing");
    }

    #[test]
    fn failed_ai_edit_leaves_the_photo_unchanged() {
        let mut editor = editor();
        editor.set_photo(Photo::new(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]))));

        let failing = |_: &[u8], _: &str, _: &str| -> Result<Vec<u8>, EditError> {
            Err(EditError::Request("model overloaded".into()))
        };
        assert!(editor.apply_ai_edit(&failing, "anything").is_err());
        assert_eq!(editor.photo().unwrap().width(), 4);

        let garbage =
            |_: &[u8], _: &str, _: &str| -> Result<Vec<u8>, EditError> { Ok(b"not an image".to_vec()) };
        assert!(editor.apply_ai_edit(&garbage, "anything").is_err());
        assert_eq!(editor.photo().unwrap().width(), 4);
    }

    #[test]
    fn ai_edit_without_photo_is_rejected() {
        let mut editor = editor();
        let never = |_: &[u8], _: &str, _: &str| -> Result<Vec<u8>, EditError> {
            panic!("collaborator must not be called without a photo")
        };
        assert!(matches!(
            editor.apply_ai_edit(&never, "anything"),
            Err(EditError::NoPhoto)
        ));
    }
}
