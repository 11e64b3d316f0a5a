//! Plain input records supplied by the form collaborator.
//!
//! The engine never reads widgets or form files. Whatever drives it snapshots
//! the current values into [`TextField`] and [`ImageEntry`] records first.

use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

use crate::FolioError;

/// Most images a single page holds (a 2x2 grid).
pub const MAX_IMAGES: usize = 4;

/// Label of the field merged into the city line.
pub const ZIP_CODE_LABEL: &str = "zip_code";

/// Label of the field that receives the zip code.
pub const CITY_LABEL: &str = "city";

/// Label of the field drawn with extra leading.
pub const NOTE_LABEL: &str = "note";

/// A labeled piece of text destined for the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    label: String,
    value: String,
}

impl TextField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true for the field that gets extra leading.
    pub fn is_note(&self) -> bool {
        self.label == NOTE_LABEL
    }
}

/// Converts an ordered label-to-value mapping into a field sequence,
/// preserving insertion order.
///
/// # Examples
///
/// ```
/// # use folio::{TextField, fields_from_map};
/// # use indexmap::IndexMap;
/// let mut map = IndexMap::new();
/// map.insert("file_number".to_string(), "123".to_string());
/// map.insert("address".to_string(), "1 Main St".to_string());
///
/// let fields = fields_from_map(map);
/// assert_eq!(fields[0], TextField::new("file_number", "123"));
/// assert_eq!(fields[1].label(), "address");
/// ```
pub fn fields_from_map(map: IndexMap<String, String>) -> Vec<TextField> {
    map.into_iter()
        .map(|(label, value)| TextField::new(label, value))
        .collect()
}

/// Where an image's bytes come from.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file to open and decode.
    Path(PathBuf),
    /// An encoded image (PNG, JPEG, ...) already in memory.
    Encoded(Vec<u8>),
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Encoded(bytes) => write!(f, "Encoded({} bytes)", bytes.len()),
        }
    }
}

/// A user-attached picture plus its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    id: String,
    source: ImageSource,
    caption: String,
}

impl ImageEntry {
    /// Creates an entry with an explicit identifier.
    pub fn new(id: impl Into<String>, source: ImageSource, caption: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source,
            caption: caption.into(),
        }
    }

    /// Creates an entry for an image file, identified by its path.
    pub fn from_path(path: impl AsRef<Path>, caption: impl Into<String>) -> Self {
        let path = path.as_ref();
        Self::new(
            path.display().to_string(),
            ImageSource::Path(path.to_path_buf()),
            caption,
        )
    }

    /// Creates an entry for an in-memory encoded image.
    pub fn from_bytes(id: impl Into<String>, bytes: Vec<u8>, caption: impl Into<String>) -> Self {
        Self::new(id, ImageSource::Encoded(bytes), caption)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}

/// Checks collection shapes before any normalization runs.
///
/// # Errors
///
/// Returns [`FolioError::InvalidInput`] for an empty or duplicate field
/// label, an empty or duplicate image identifier, or more than
/// [`MAX_IMAGES`] images.
pub fn validate_inputs(fields: &[TextField], images: &[ImageEntry]) -> Result<(), FolioError> {
    let mut labels = HashSet::with_capacity(fields.len());
    for (position, field) in fields.iter().enumerate() {
        if field.label.trim().is_empty() {
            return Err(FolioError::invalid_input(
                format!("fields[{position}]"),
                "field label must not be empty",
            ));
        }
        if !labels.insert(field.label.as_str()) {
            return Err(FolioError::invalid_input(
                &field.label,
                "field label appears more than once",
            ));
        }
    }

    if images.len() > MAX_IMAGES {
        return Err(FolioError::invalid_input(
            "images",
            format!(
                "a page holds at most {MAX_IMAGES} images, got {}",
                images.len()
            ),
        ));
    }

    let mut ids = HashSet::with_capacity(images.len());
    for (position, image) in images.iter().enumerate() {
        if image.id.trim().is_empty() {
            return Err(FolioError::invalid_input(
                format!("images[{position}]"),
                "image identifier must not be empty",
            ));
        }
        if !ids.insert(image.id.as_str()) {
            return Err(FolioError::invalid_input(
                &image.id,
                "image already attached",
            ));
        }
    }

    Ok(())
}
