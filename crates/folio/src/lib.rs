//! Folio - deterministic single-page layout of text fields and captioned images.
//!
//! Folio turns a handful of labeled text fields and up to four captioned
//! images into one page: a centered header block, two rule lines, and a 2x2
//! image grid with a border and caption under every image. The page is
//! written as PDF or SVG.

pub mod config;
pub mod export;

mod compose;
mod error;
mod input;
mod layout;
mod normalize;

pub use folio_core::{color, draw, geometry};

pub use compose::compose_document;
pub use error::FolioError;
pub use input::{
    CITY_LABEL, ImageEntry, ImageSource, MAX_IMAGES, NOTE_LABEL, TextField, ZIP_CODE_LABEL,
    fields_from_map, validate_inputs,
};
pub use layout::{ImageSlot, PageGeometry, PageLayout, calculate_layout};
pub use normalize::{PreparedImage, parse_image_data, parse_text_data};

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace, warn};

use config::AppConfig;
use draw::Document;
use export::OutputFormat;

/// Where an engine is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RenderState {
    Unrendered,
    Rendered(PathBuf),
}

/// Lays out one attachment page and renders it once.
///
/// Construction validates the inputs, normalizes the text, decodes the
/// images and computes the page geometry. Images that fail to decode are left
/// out and reported through [`skipped_images`](Self::skipped_images).
///
/// # Examples
///
/// ```rust,no_run
/// use folio::{DocumentLayoutEngine, ImageEntry, TextField, config::AppConfig};
///
/// let fields = vec![
///     TextField::new("file_number", "123"),
///     TextField::new("city", "Tampa"),
///     TextField::new("zip_code", "33601"),
/// ];
/// let images = vec![ImageEntry::from_path("front.png", "Front view")];
///
/// let mut engine = DocumentLayoutEngine::new(fields, images, AppConfig::default())
///     .expect("valid inputs");
/// engine.render("attachment.pdf").expect("page written");
/// ```
#[derive(Debug)]
pub struct DocumentLayoutEngine {
    config: AppConfig,
    lines: Vec<TextField>,
    images: Vec<PreparedImage>,
    skipped: Vec<FolioError>,
    layout: PageLayout,
    document: Document,
    state: RenderState,
}

impl DocumentLayoutEngine {
    /// Validates the inputs and prepares the page.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidInput`] for malformed field or image
    /// collections, an unusable configuration, or a page too small for the
    /// image grid. Undecodable images are not errors here, and a page whose
    /// images all fail to decode is laid out as text only.
    pub fn new(
        fields: Vec<TextField>,
        images: Vec<ImageEntry>,
        config: AppConfig,
    ) -> Result<Self, FolioError> {
        info!(fields = fields.len(), images = images.len(); "Preparing attachment page");

        validate_inputs(&fields, &images)?;
        config.validate()?;

        let lines = parse_text_data(&fields, config.layout().state_abbreviation());
        trace!(lines:?; "Normalized text lines");

        let (prepared, skipped) = parse_image_data(&images, config.layout().image_box_size());
        let layout = calculate_layout(&lines, prepared.len(), &config)?;
        let document = compose_document(&lines, &prepared, &layout, config.style())?;

        debug!(
            lines = lines.len(),
            images = prepared.len(),
            skipped = skipped.len();
            "Attachment page prepared"
        );

        Ok(Self {
            config,
            lines,
            images: prepared,
            skipped,
            layout,
            document,
            state: RenderState::Unrendered,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The displayed text lines after normalization.
    pub fn lines(&self) -> &[TextField] {
        &self.lines
    }

    /// The images that will be placed, in input order.
    pub fn images(&self) -> &[PreparedImage] {
        &self.images
    }

    /// One [`FolioError::ImageDecode`] per image left out of the page.
    pub fn skipped_images(&self) -> &[FolioError] {
        &self.skipped
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The draw operations a renderer replays.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.state, RenderState::Rendered(_))
    }

    /// Encodes the page without touching the filesystem.
    ///
    /// Does not change the render state.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Render`] if the page cannot be encoded.
    pub fn render_to_bytes(&self, format: OutputFormat) -> Result<Vec<u8>, FolioError> {
        info!(format:%; "Encoding page");
        format
            .exporter()
            .export(&self.document)
            .map_err(|err| FolioError::render(format.to_string(), err))
    }

    /// Writes the page to a new file at `path`.
    ///
    /// The format follows the file extension (`.pdf` or `.svg`); any other
    /// extension is written as PDF.
    ///
    /// # Errors
    ///
    /// See [`render_as`](Self::render_as).
    pub fn render(&mut self, path: impl AsRef<Path>) -> Result<(), FolioError> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path).unwrap_or_default();
        self.render_as(path, format)
    }

    /// Writes the page in `format` to a new file at `path`.
    ///
    /// A successful call moves the engine to the rendered state. A failed
    /// call leaves it unrendered so the caller may try again.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::AlreadyRendered`] if the page was already
    /// written, and [`FolioError::Render`] if `path` already exists or
    /// cannot be written.
    pub fn render_as(
        &mut self,
        path: impl AsRef<Path>,
        format: OutputFormat,
    ) -> Result<(), FolioError> {
        self.render_with(path.as_ref(), format, write_new_file)
    }

    fn render_with(
        &mut self,
        path: &Path,
        format: OutputFormat,
        write: impl FnOnce(&Path, &[u8]) -> Result<(), FolioError>,
    ) -> Result<(), FolioError> {
        if let RenderState::Rendered(previous) = &self.state {
            return Err(FolioError::AlreadyRendered(previous.clone()));
        }

        let bytes = self.render_to_bytes(format)?;
        write(path, &bytes)?;

        info!(path:? = path, bytes = bytes.len(); "Attachment page written");
        self.state = RenderState::Rendered(path.to_path_buf());
        Ok(())
    }
}

/// Creates `path`, which must not exist yet, and writes `bytes` to it.
fn write_new_file(path: &Path, bytes: &[u8]) -> Result<(), FolioError> {
    let file = File::create_new(path).map_err(|err| {
        error!(path:? = path, err:err; "Failed to create output file");
        FolioError::render(path.display().to_string(), err)
    })?;

    write_page(file, path, bytes)
}

/// Fills `file`, freshly created at `path`. On failure the partial page at
/// `path` is removed.
fn write_page(mut file: File, path: &Path, bytes: &[u8]) -> Result<(), FolioError> {
    let Err(err) = file.write_all(bytes).and_then(|()| file.sync_all()) else {
        return Ok(());
    };

    error!(path:? = path, err:err; "Failed to write output file");
    drop(file);
    if let Err(cleanup) = fs::remove_file(path) {
        warn!(path:? = path, err:err = cleanup; "Partial output file left behind");
    }
    Err(FolioError::render(path.display().to_string(), err))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::png_bytes;

    fn fields() -> Vec<TextField> {
        vec![
            TextField::new("file_number", "123"),
            TextField::new("address", "1 Main St"),
            TextField::new("city", "Tampa"),
            TextField::new("zip_code", "33601"),
            TextField::new("note", "* note"),
        ]
    }

    fn images(count: usize) -> Vec<ImageEntry> {
        (0..count)
            .map(|i| {
                ImageEntry::from_bytes(format!("img{i}.png"), png_bytes(8, 8), format!("view {i}"))
            })
            .collect()
    }

    #[test]
    fn test_engine_prepares_page() {
        let engine = DocumentLayoutEngine::new(fields(), images(2), AppConfig::default()).unwrap();

        assert_eq!(engine.lines().len(), 4);
        assert_eq!(engine.images().len(), 2);
        assert!(engine.skipped_images().is_empty());
        assert_eq!(engine.layout().slots().len(), 2);
        assert_eq!(engine.document().images().count(), 2);
        assert!(!engine.is_rendered());
    }

    fn many_fields(count: usize) -> Vec<TextField> {
        (0..count)
            .map(|i| TextField::new(format!("f{i}"), "x"))
            .collect()
    }

    #[test]
    fn test_engine_rejects_crowded_page_with_images() {
        let err = DocumentLayoutEngine::new(many_fields(15), images(1), AppConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::InvalidInput { ref subject, .. } if subject == "fields"
        ));
    }

    #[test]
    fn test_engine_lays_out_crowded_text_only_page() {
        let engine =
            DocumentLayoutEngine::new(many_fields(15), vec![], AppConfig::default()).unwrap();

        assert_eq!(engine.lines().len(), 15);
        assert!(engine.layout().slots().is_empty());
        assert_eq!(engine.document().texts().count(), 15);
    }

    #[test]
    fn test_engine_crowded_page_with_only_broken_images_is_text_only() {
        let broken = vec![ImageEntry::from_bytes("bad.png", b"nope".to_vec(), "bad")];

        let engine =
            DocumentLayoutEngine::new(many_fields(15), broken, AppConfig::default()).unwrap();

        assert!(engine.images().is_empty());
        assert_eq!(engine.skipped_images().len(), 1);
        assert!(engine.layout().slots().is_empty());
    }

    /// Opens a handle on `/dev/full`, where every write fails with `ENOSPC`.
    #[cfg(target_os = "linux")]
    fn full_device() -> File {
        fs::OpenOptions::new()
            .write(true)
            .open("/dev/full")
            .expect("/dev/full is writable")
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_removes_partial_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attachment.pdf");
        fs::write(&path, b"%PDF-partial").unwrap();

        let err = write_page(full_device(), &path, b"%PDF-1.7").unwrap_err();

        assert!(matches!(
            err,
            FolioError::Render { ref target, .. } if target.ends_with("attachment.pdf")
        ));
        assert!(!path.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_leaves_engine_retryable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attachment.pdf");
        let mut engine =
            DocumentLayoutEngine::new(fields(), images(1), AppConfig::default()).unwrap();

        let err = engine
            .render_with(&path, OutputFormat::Pdf, |path, bytes| {
                fs::write(path, b"%PDF-partial").unwrap();
                write_page(full_device(), path, bytes)
            })
            .unwrap_err();

        assert!(matches!(err, FolioError::Render { .. }));
        assert!(!engine.is_rendered());
        assert!(!path.exists());

        engine.render(&path).unwrap();
        assert!(engine.is_rendered());
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_to_bytes_leaves_engine_unrendered() {
        let engine = DocumentLayoutEngine::new(fields(), images(1), AppConfig::default()).unwrap();

        let pdf = engine.render_to_bytes(OutputFormat::Pdf).unwrap();
        let svg = engine.render_to_bytes(OutputFormat::Svg).unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(String::from_utf8(svg).unwrap().contains("<svg"));
        assert!(!engine.is_rendered());
    }
}
