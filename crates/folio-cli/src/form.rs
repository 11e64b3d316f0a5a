//! Form file loading.
//!
//! A form file is TOML listing the text fields and attached images in page
//! order:
//!
//! ```toml
//! [[fields]]
//! label = "file_number"
//! value = "123"
//!
//! [[images]]
//! path = "front.png"
//! caption = "Front view"
//! ```
//!
//! Relative image paths resolve against the form file's directory.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use folio::{ImageEntry, NOTE_LABEL, TextField};

use crate::config::{ConfigError, parse_toml, read_file};

/// Note line added when the form does not supply one.
pub const DEFAULT_NOTE: &str = "* Attachment page to FEMA Elevation Certificate";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FormFile {
    #[serde(default)]
    fields: Vec<FieldSpec>,
    #[serde(default)]
    images: Vec<ImageSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSpec {
    label: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ImageSpec {
    path: PathBuf,
    #[serde(default)]
    caption: String,
}

/// Engine inputs read from a form file.
#[derive(Debug)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub images: Vec<ImageEntry>,
}

/// Reads the form at `path`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing, unreadable or not a valid
/// form.
pub fn load_form(path: impl AsRef<Path>) -> Result<Form, ConfigError> {
    let path = path.as_ref();
    info!(path:? = path; "Loading form");

    let content = read_file(path)?;
    let file: FormFile = parse_toml(path, &content)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let form = Form {
        fields: with_default_note(file.fields),
        images: file
            .images
            .into_iter()
            .map(|image| ImageEntry::from_path(base_dir.join(image.path), image.caption))
            .collect(),
    };
    debug!(fields = form.fields.len(), images = form.images.len(); "Form loaded");

    Ok(form)
}

fn with_default_note(specs: Vec<FieldSpec>) -> Vec<TextField> {
    let mut fields: Vec<_> = specs
        .into_iter()
        .map(|spec| TextField::new(spec.label, spec.value))
        .collect();
    if !fields.iter().any(TextField::is_note) {
        fields.push(TextField::new(NOTE_LABEL, DEFAULT_NOTE));
    }
    fields
}
