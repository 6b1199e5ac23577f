//! halo-renderer: Profile picture ring-frame rendering library
//!
//! This crate renders circular profile-picture previews: a cover-fit photo
//! inside a circular clip, a colored ring arc around it, and text curved
//! along the arc — then exports the result as PNG.
//!
//! # Example
//!
//! ```
//! use halo_renderer::{FrameEditor, ThemeCatalog};
//!
//! let mut editor = FrameEditor::new(ThemeCatalog::builtin());
//! editor.set_theme("christmas-merry");
//!
//! // Ring text and color derive from the theme until overridden.
//! assert_eq!(editor.ring_text(), "MERRY CHRISTMAS 🎄");
//!
//! let surface = editor.render();
//! let png = surface.encode_png().unwrap();
//! assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
//! ```
//!
//! # Serializable Profiles
//!
//! For frontend-backend communication, editor settings round-trip through
//! [`EditorProfile`] via the [`Configurable`] trait:
//!
//! ```
//! use halo_renderer::{Configurable, EditorProfile, FrameEditor, ThemeCatalog};
//!
//! let mut editor = FrameEditor::new(ThemeCatalog::builtin());
//!
//! let profile = EditorProfile::new()
//!     .with_theme("open-to-work")
//!     .with_custom_text("🚀 JOINING ACME")
//!     .with_radial_background(true);
//! editor.apply_profile(&profile);
//!
//! let json = editor.export_profile().to_json().unwrap();
//! assert!(json.contains("\"themeId\":\"open-to-work\""));
//! ```

mod edit;
mod editor;
mod photo;
mod profile;
mod render;
mod theme;

pub use edit::{edit_prompt, EditError, ImageEditor};
pub use editor::{Configurable, FrameEditor, MAX_TEXT_SIZE, MIN_TEXT_SIZE};
pub use photo::{PanOffset, Photo, PhotoError};
pub use profile::EditorProfile;
pub use render::compositor::{
    draw_frame, AVATAR_RADIUS, RING_END_ANGLE, RING_START_ANGLE, RING_WIDTH,
};
pub use render::curved_text::{draw_curved_text, layout_arc, PlacedCluster};
pub use render::font::FontStore;
pub use render::{PngError, Surface};
pub use theme::{Color, Theme, ThemeCatalog, EMOJI_SUGGESTIONS};
