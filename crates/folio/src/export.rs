//! Export of a composed page to an output format.
//!
//! This module provides the [`Exporter`] trait that turns a
//! [`Document`] into encoded bytes. It is the final stage of the Folio
//! pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Fields + Images
//!     ↓ normalize
//! Display Lines + Prepared Images
//!     ↓ layout
//! Page Layout
//!     ↓ compose
//! Document (draw operations)
//!     ↓ export (this module)
//! PDF / SVG bytes
//! ```
//!
//! # Available Backends
//!
//! - [`pdf`] - PDF output via [`pdf::PdfExporter`]
//! - [`svg`] - SVG output via [`svg::SvgExporter`]

pub mod pdf;
pub mod svg;

use std::{fmt, path::Path, str::FromStr};

use thiserror::Error;

use folio_core::draw::Document;

/// Abstraction for page export backends.
pub trait Exporter {
    /// Encodes the document in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if an element cannot be represented in the
    /// target format, or [`Error::Io`] if writing fails.
    fn export(&self, document: &Document) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during export.
///
/// Converted into [`FolioError::Render`](crate::FolioError::Render) at the
/// crate boundary together with the output target.
#[derive(Debug, Error)]
pub enum Error {
    /// An element could not be encoded, described by the message.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output formats a page can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Svg,
}

impl OutputFormat {
    /// Infers the format from a file extension, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use folio::export::OutputFormat;
    /// # use std::path::Path;
    /// assert_eq!(OutputFormat::from_path(Path::new("out.PDF")), Some(OutputFormat::Pdf));
    /// assert_eq!(OutputFormat::from_path(Path::new("page.svg")), Some(OutputFormat::Svg));
    /// assert_eq!(OutputFormat::from_path(Path::new("notes.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// The conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }

    /// Returns the backend for this format.
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Pdf => Box::new(pdf::PdfExporter::new()),
            Self::Svg => Box::new(svg::SvgExporter::new()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported output format `{other}`")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
