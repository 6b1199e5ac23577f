//! Serializable editor profile for cross-process communication.
//!
//! An [`EditorProfile`] captures every editor setting except the photo in a
//! JSON-friendly format, matching the state shape front-ends keep. Missing
//! fields deserialize to the editor defaults, so `{}` is a valid profile.
//!
//! # Example
//!
//! ```
//! use halo_renderer::EditorProfile;
//!
//! let profile = EditorProfile::new()
//!     .with_theme("christmas-merry")
//!     .with_custom_text("HELLO 👋")
//!     .with_text_size(40);
//!
//! let json = profile.to_json().unwrap();
//! let restored = EditorProfile::from_json(&json).unwrap();
//! assert_eq!(restored.theme_id, "christmas-merry");
//! ```

use serde::{Deserialize, Serialize};

use crate::photo::PanOffset;

/// A serializable snapshot of the editor's settings.
///
/// # JSON Format
///
/// ```json
/// {
///   "zoom": 1.0,
///   "pan": { "x": 0.0, "y": 0.0 },
///   "themeId": "christmas-merry",
///   "customText": "",
///   "customColor": "",
///   "textSize": 32,
///   "showRadialBackground": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorProfile {
    /// Zoom multiplier on top of the cover-fit scale.
    pub zoom: f32,

    /// Pan offset in logical pixels.
    pub pan: PanOffset,

    /// Active theme id. Empty means the catalog's first theme.
    pub theme_id: String,

    /// User ring text; empty means the theme's default text.
    pub custom_text: String,

    /// CSS-style ring color override; empty means the theme's primary color.
    pub custom_color: String,

    /// Ring text size in pixels.
    pub text_size: u32,

    /// Whether the radial background is painted.
    pub show_radial_background: bool,
}

impl Default for EditorProfile {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: PanOffset::default(),
            theme_id: String::new(),
            custom_text: String::new(),
            custom_color: String::new(),
            text_size: 32,
            show_radial_background: false,
        }
    }
}

impl EditorProfile {
    /// Creates a profile with the editor defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_pan(mut self, pan: PanOffset) -> Self {
        self.pan = pan;
        self
    }

    pub fn with_theme(mut self, theme_id: impl Into<String>) -> Self {
        self.theme_id = theme_id.into();
        self
    }

    pub fn with_custom_text(mut self, text: impl Into<String>) -> Self {
        self.custom_text = text.into();
        self
    }

    pub fn with_custom_color(mut self, color: impl Into<String>) -> Self {
        self.custom_color = color.into();
        self
    }

    pub fn with_text_size(mut self, size: u32) -> Self {
        self.text_size = size;
        self
    }

    pub fn with_radial_background(mut self, enabled: bool) -> Self {
        self.show_radial_background = enabled;
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
