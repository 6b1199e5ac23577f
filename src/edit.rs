//! Boundary to the external AI image-editing collaborator.
//!
//! The crate never talks to a network itself. Callers hand in an
//! [`ImageEditor`] — anything that can turn image bytes plus an instruction
//! into new image bytes — and [`FrameEditor::apply_ai_edit`] drives the
//! exchange: encode the current photo, call the collaborator, decode the
//! result. On any failure the current photo stays untouched.
//!
//! [`FrameEditor::apply_ai_edit`]: crate::FrameEditor::apply_ai_edit

use thiserror::Error;

use crate::photo::PhotoError;

/// Errors surfaced by an AI edit exchange.
#[derive(Debug, Error)]
pub enum EditError {
    /// There is no photo to edit.
    #[error("no photo loaded to edit")]
    NoPhoto,

    /// The collaborator responded without image data.
    #[error("the image editor returned no image data")]
    NoImage,

    /// The collaborator's request failed (transport, quota, refusal, ...).
    #[error("image edit request failed: {0}")]
    Request(String),

    /// Encoding the current photo or decoding the edited one failed.
    #[error(transparent)]
    Photo(#[from] PhotoError),
}

/// An opaque image-editing collaborator.
///
/// Implementations receive encoded image bytes, their MIME type, and a full
/// instruction prompt, and return the edited image bytes. Plain closures
/// with the matching signature implement the trait, which keeps tests and
/// small integrations free of wrapper types.
pub trait ImageEditor {
    fn edit_image(&self, image: &[u8], mime_type: &str, prompt: &str) -> Result<Vec<u8>, EditError>;
}

impl<F> ImageEditor for F
where
    F: Fn(&[u8], &str, &str) -> Result<Vec<u8>, EditError>,
{
    fn edit_image(&self, image: &[u8], mime_type: &str, prompt: &str) -> Result<Vec<u8>, EditError> {
        self(image, mime_type, prompt)
    }
}

/// Builds the canonical edit prompt around a user instruction.
pub fn edit_prompt(instruction: &str) -> String {
    format!(
        "Edit this image: {instruction}. Maintain the main subject but apply \
         the requested changes. Output only the image."
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_instruction() {
        let prompt = edit_prompt("Add a Santa hat");
        assert!(prompt.starts_with("Edit this image: Add a Santa hat."));
        assert!(prompt.ends_with("Output only the image."));
    }

    #[test]
    fn closures_implement_image_editor() {
        let editor = |image: &[u8], mime: &str, _prompt: &str| -> Result<Vec<u8>, EditError> {
            assert_eq!(mime, "image/png");
            Ok(image.to_vec())
        };
        let edited = ImageEditor::edit_image(&editor, b"bytes", "image/png", "p").unwrap();
        assert_eq!(edited, b"bytes");
    }

    #[test]
    fn errors_format_for_display() {
        let err = EditError::Request("rate limited".into());
        assert_eq!(err.to_string(), "image edit request failed: rate limited");
    }
}
