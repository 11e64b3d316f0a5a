//! Error types for Folio operations.
//!
//! This module provides the main error type [`FolioError`]. Every variant
//! names the field label, image identifier or output target it concerns so
//! callers can report a precise message.

use std::path::PathBuf;

use thiserror::Error;

use crate::export;

/// The main error type for Folio operations.
///
/// # Recoverability
///
/// - [`InvalidInput`](Self::InvalidInput) is fatal and raised before any
///   rendering work begins.
/// - [`ImageDecode`](Self::ImageDecode) is recovered inside the engine: the
///   image is left out of the page and the error is reported through
///   [`DocumentLayoutEngine::skipped_images`](crate::DocumentLayoutEngine::skipped_images).
/// - [`Render`](Self::Render) is fatal for one render attempt. The engine
///   stays unrendered, so the caller may decide to retry.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Invalid input `{subject}`: {reason}")]
    InvalidInput { subject: String, reason: String },

    #[error("Failed to decode image `{id}`: {source}")]
    ImageDecode {
        id: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to render `{target}`: {source}")]
    Render {
        target: String,
        #[source]
        source: export::Error,
    },

    #[error("Document was already rendered to `{}`", .0.display())]
    AlreadyRendered(PathBuf),
}

impl FolioError {
    /// Create a new `InvalidInput` error for the named field, image or setting.
    pub fn invalid_input(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// Create a new `Render` error for the given output target.
    pub fn render(target: impl Into<String>, source: impl Into<export::Error>) -> Self {
        Self::Render {
            target: target.into(),
            source: source.into(),
        }
    }
}
