//! Normalization of field text and image attachments.
//!
//! Field values and captions are upper-cased, the city and zip code lines are
//! merged, and every image is decoded and resized to the configured box size.

use std::sync::Arc;

use image::{
    DynamicImage, ImageError,
    error::{ParameterError, ParameterErrorKind},
    imageops::FilterType,
};
use log::{debug, info, warn};

use folio_core::{
    draw::{RasterError, RasterImage},
    geometry::Size,
};

use crate::{
    FolioError,
    input::{CITY_LABEL, ImageEntry, ImageSource, TextField, ZIP_CODE_LABEL},
};

/// An image decoded, resized and ready for placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    id: String,
    caption: String,
    raster: Arc<RasterImage>,
}

impl PreparedImage {
    /// Returns the identifier of the source entry.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the upper-cased caption.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Returns the resized pixels.
    pub fn raster(&self) -> &Arc<RasterImage> {
        &self.raster
    }
}

/// Upper-cases every field value and merges `city` with `zip_code`.
///
/// When both a `city` and a `zip_code` field hold text, the city line becomes
/// `"<CITY>, <STATE>, <ZIP>"` at the city's position and the zip code line is
/// dropped. Otherwise the sequence keeps its order and length.
///
/// # Examples
///
/// ```
/// # use folio::{TextField, parse_text_data};
/// let fields = vec![
///     TextField::new("address", "1 Main St"),
///     TextField::new("city", "Tampa"),
///     TextField::new("zip_code", "33601"),
/// ];
///
/// let lines = parse_text_data(&fields, "FL");
/// assert_eq!(
///     lines,
///     vec![
///         TextField::new("address", "1 MAIN ST"),
///         TextField::new("city", "TAMPA, FL, 33601"),
///     ]
/// );
/// ```
pub fn parse_text_data(fields: &[TextField], state: &str) -> Vec<TextField> {
    let mut lines: Vec<TextField> = fields
        .iter()
        .map(|field| TextField::new(field.label(), field.value().to_uppercase()))
        .collect();

    let city = lines.iter().position(|f| f.label() == CITY_LABEL);
    let zip = lines.iter().position(|f| f.label() == ZIP_CODE_LABEL);

    if let (Some(city), Some(zip)) = (city, zip) {
        if !lines[city].value().is_empty() && !lines[zip].value().is_empty() {
            let merged = format!("{}, {}, {}", lines[city].value(), state, lines[zip].value());
            debug!(line = merged.as_str(); "Merged city and zip code");
            lines[city] = TextField::new(CITY_LABEL, merged);
            lines.remove(zip);
        }
    }

    lines
}

/// Upper-cases captions and decodes and resizes every image to `box_size`.
///
/// Images that cannot be opened or decoded are logged and left out. The
/// returned error list names each skipped image, in input order.
pub fn parse_image_data(
    images: &[ImageEntry],
    box_size: Size,
) -> (Vec<PreparedImage>, Vec<FolioError>) {
    let (width, height) = pixel_dimensions(box_size);
    let mut prepared = Vec::with_capacity(images.len());
    let mut skipped = Vec::new();

    for entry in images {
        match prepare_image(entry, width, height) {
            Ok(image) => prepared.push(image),
            Err(err) => {
                warn!(image_id = entry.id(), err:err; "Skipping image that could not be decoded");
                skipped.push(FolioError::ImageDecode {
                    id: entry.id().to_string(),
                    source: err,
                });
            }
        }
    }

    info!(
        prepared = prepared.len(),
        skipped = skipped.len();
        "Images prepared"
    );

    (prepared, skipped)
}

fn prepare_image(entry: &ImageEntry, width: u32, height: u32) -> Result<PreparedImage, ImageError> {
    info!(image_id = entry.id(), width, height; "Resizing image");

    let decoded = decode(entry.source())?;
    let resized = decoded.resize_exact(width, height, FilterType::Triangle);
    let rgba = resized.to_rgba8();
    let raster = RasterImage::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
        .map_err(raster_error)?;

    Ok(PreparedImage {
        id: entry.id().to_string(),
        caption: entry.caption().to_uppercase(),
        raster: Arc::new(raster),
    })
}

fn raster_error(err: RasterError) -> ImageError {
    ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::Generic(
        err.to_string(),
    )))
}

fn decode(source: &ImageSource) -> Result<DynamicImage, ImageError> {
    match source {
        ImageSource::Path(path) => image::open(path),
        ImageSource::Encoded(bytes) => image::load_from_memory(bytes),
    }
}

/// Image boxes are measured in points; rasters are resized to one pixel per
/// point, never smaller than 1x1.
fn pixel_dimensions(box_size: Size) -> (u32, u32) {
    let to_pixels = |value: f32| value.round().max(1.0) as u32;
    (to_pixels(box_size.width()), to_pixels(box_size.height()))
}
