//! Integration tests for the DocumentLayoutEngine API
//!
//! These tests drive the public API end to end: inputs in, a page file out.

use std::{fs, io::Cursor, path::Path};

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::tempdir;

use folio::{
    DocumentLayoutEngine, FolioError, ImageEntry, TextField, config::AppConfig,
    export::OutputFormat,
};

fn form_fields() -> Vec<TextField> {
    vec![
        TextField::new("file_number", "123"),
        TextField::new("address", "1 Main St"),
        TextField::new("city", "Tampa"),
        TextField::new("zip_code", "33601"),
        TextField::new("note", "* Attachment page to FEMA Elevation Certificate"),
    ]
}

/// Writes a small PNG fixture and returns its entry.
fn png_entry(dir: &Path, name: &str, caption: &str) -> ImageEntry {
    let path = dir.join(name);
    let image = RgbaImage::from_pixel(16, 12, Rgba([20, 120, 200, 255]));
    image.save(&path).expect("Failed to write PNG fixture");
    ImageEntry::from_path(path, caption)
}

fn png_bytes() -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode PNG");
    bytes.into_inner()
}

#[test]
fn test_render_pdf_with_four_images() {
    let dir = tempdir().expect("Failed to create temp directory");
    let images: Vec<_> = ["front", "back", "left", "right"]
        .iter()
        .map(|name| png_entry(dir.path(), &format!("{name}.png"), name))
        .collect();

    let mut engine = DocumentLayoutEngine::new(form_fields(), images, AppConfig::default())
        .expect("Failed to prepare page");
    let output = dir.path().join("attachment.pdf");
    engine.render(&output).expect("Failed to render page");

    let bytes = fs::read(&output).expect("Output should exist");
    assert!(bytes.starts_with(b"%PDF-"), "Output should be a PDF");
    assert!(engine.is_rendered());
    assert_eq!(engine.document().images().count(), 4);
    assert_eq!(engine.document().borders().count(), 4);
}

#[test]
fn test_one_undecodable_image_is_skipped() {
    let dir = tempdir().expect("Failed to create temp directory");
    let corrupt = dir.path().join("corrupt.png");
    fs::write(&corrupt, b"not a png at all").expect("Failed to write fixture");

    let images = vec![
        png_entry(dir.path(), "a.png", "a"),
        ImageEntry::from_path(&corrupt, "corrupt"),
        png_entry(dir.path(), "b.png", "b"),
        png_entry(dir.path(), "c.png", "c"),
    ];

    let mut engine = DocumentLayoutEngine::new(form_fields(), images, AppConfig::default())
        .expect("A decode failure must not abort the page");

    assert_eq!(engine.document().images().count(), 3);
    assert_eq!(engine.skipped_images().len(), 1);
    match &engine.skipped_images()[0] {
        FolioError::ImageDecode { id, .. } => assert_eq!(id, &corrupt.display().to_string()),
        other => panic!("Unexpected error: {other:?}"),
    }

    let output = dir.path().join("attachment.pdf");
    engine.render(&output).expect("Failed to render page");
    assert!(output.exists());
}

#[test]
fn test_second_render_is_rejected() {
    let dir = tempdir().expect("Failed to create temp directory");
    let mut engine = DocumentLayoutEngine::new(form_fields(), Vec::new(), AppConfig::default())
        .expect("Failed to prepare page");

    let first = dir.path().join("first.pdf");
    engine.render(&first).expect("Failed to render page");

    let second = dir.path().join("second.pdf");
    let err = engine.render(&second).unwrap_err();
    assert!(matches!(err, FolioError::AlreadyRendered(ref path) if path == &first));
    assert!(!second.exists());
}

#[test]
fn test_existing_output_is_not_overwritten() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("attachment.pdf");
    fs::write(&output, b"keep me").expect("Failed to write fixture");

    let mut engine = DocumentLayoutEngine::new(form_fields(), Vec::new(), AppConfig::default())
        .expect("Failed to prepare page");

    let err = engine.render(&output).unwrap_err();
    assert!(matches!(err, FolioError::Render { .. }));
    assert_eq!(fs::read(&output).unwrap(), b"keep me");

    // A failed render leaves the engine free to try elsewhere.
    assert!(!engine.is_rendered());
    let retry = dir.path().join("retry.pdf");
    engine.render(&retry).expect("Retry should succeed");
    assert!(retry.exists());
}

#[test]
fn test_svg_inferred_from_extension() {
    let dir = tempdir().expect("Failed to create temp directory");
    let images = vec![ImageEntry::from_bytes("mem.png", png_bytes(), "in memory")];

    let mut engine = DocumentLayoutEngine::new(form_fields(), images, AppConfig::default())
        .expect("Failed to prepare page");
    let output = dir.path().join("attachment.svg");
    engine.render(&output).expect("Failed to render page");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("TAMPA, FL, 33601"));
    assert!(svg.contains("IN MEMORY"));
}

#[test]
fn test_render_as_overrides_extension() {
    let dir = tempdir().expect("Failed to create temp directory");
    let mut engine = DocumentLayoutEngine::new(form_fields(), Vec::new(), AppConfig::default())
        .expect("Failed to prepare page");

    let output = dir.path().join("page.out");
    engine
        .render_as(&output, OutputFormat::Svg)
        .expect("Failed to render page");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    assert!(svg.contains("<svg"));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let five: Vec<_> = (0..5)
        .map(|i| ImageEntry::from_bytes(format!("{i}.png"), png_bytes(), "x"))
        .collect();
    let result = DocumentLayoutEngine::new(form_fields(), five, AppConfig::default());
    assert!(matches!(result, Err(FolioError::InvalidInput { .. })));

    let duplicate = vec![TextField::new("city", "a"), TextField::new("city", "b")];
    let result = DocumentLayoutEngine::new(duplicate, Vec::new(), AppConfig::default());
    assert!(matches!(result, Err(FolioError::InvalidInput { .. })));
}

#[test]
fn test_custom_config_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [layout]
        state_abbreviation = "GA"
        image_width = 250.0
        image_height = 250.0
        "#,
    )
    .expect("Failed to parse config");

    let engine = DocumentLayoutEngine::new(form_fields(), Vec::new(), config)
        .expect("Failed to prepare page");

    assert_eq!(engine.lines()[2].value(), "TAMPA, GA, 33601");
    let padding_x = engine.layout().geometry().padding_x();
    assert!((padding_x - 112.0 / 3.0).abs() < 0.001);
}
