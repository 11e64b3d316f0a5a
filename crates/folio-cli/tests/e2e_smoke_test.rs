use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{Rgba, RgbaImage};
use tempfile::tempdir;

use folio::export::OutputFormat;
use folio_cli::{Args, CliError, run};

/// Collects all .toml forms from a directory
fn collect_forms(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        format: None,
        force: false,
        log_level: "off".to_string(),
    }
}

/// Writes a form with `image_count` generated PNGs next to it.
fn write_form_with_images(dir: &Path, image_count: usize) -> PathBuf {
    let mut form = String::from(
        r#"
[[fields]]
label = "file_number"
value = "123"

[[fields]]
label = "city"
value = "Tampa"

[[fields]]
label = "zip_code"
value = "33601"
"#,
    );

    fs::create_dir_all(dir.join("photos")).unwrap();
    for i in 0..image_count {
        let name = format!("photos/view{i}.png");
        RgbaImage::from_pixel(30, 20, Rgba([i as u8 * 60, 90, 160, 255]))
            .save(dir.join(&name))
            .expect("Failed to write PNG fixture");
        form.push_str(&format!(
            "\n[[images]]\npath = \"{name}\"\ncaption = \"View {i}\"\n"
        ));
    }

    let path = dir.join("form.toml");
    fs::write(&path, form).unwrap();
    path
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let forms = collect_forms(demos_dir());

    assert!(!forms.is_empty(), "No demo forms found in demos/");

    let mut failed = Vec::new();
    for form in &forms {
        let output = temp_dir.path().join(format!(
            "{}.pdf",
            form.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args(form, &output)) {
            Ok(()) if output.exists() => {}
            Ok(()) => failed.push((form.clone(), "no output written".to_string())),
            Err(err) => failed.push((form.clone(), err.to_string())),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo forms that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo form(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let forms = collect_forms(demos_dir().join("errors"));

    assert!(!forms.is_empty(), "No error forms found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();
    for form in &forms {
        let output = temp_dir.path().join(format!(
            "error_{}.pdf",
            form.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(form, &output)).is_ok() {
            unexpectedly_succeeded.push(form.clone());
        }
        assert!(!output.exists(), "{} wrote output", form.display());
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error forms that succeeded: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_four_images_to_pdf_and_svg() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let form = write_form_with_images(temp_dir.path(), 4);

    let pdf = temp_dir.path().join("attachment.pdf");
    run(&args(&form, &pdf)).expect("PDF run failed");
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF-"));

    let svg = temp_dir.path().join("attachment.svg");
    run(&args(&form, &svg)).expect("SVG run failed");
    let content = fs::read_to_string(&svg).unwrap();
    assert_eq!(content.matches("data:image/png;base64,").count(), 4);
    assert!(content.contains("TAMPA, FL, 33601"));
    assert!(content.contains("VIEW 3"));
    assert!(content.contains("* ATTACHMENT PAGE TO FEMA ELEVATION CERTIFICATE"));
}

#[test]
fn e2e_existing_output_requires_force() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let form = write_form_with_images(temp_dir.path(), 1);
    let output = temp_dir.path().join("attachment.pdf");
    fs::write(&output, b"old").unwrap();

    let err = run(&args(&form, &output)).unwrap_err();
    assert!(matches!(err, CliError::Folio(_)));
    assert_eq!(fs::read(&output).unwrap(), b"old");

    let mut forced = args(&form, &output);
    forced.force = true;
    run(&forced).expect("Forced run failed");
    assert!(fs::read(&output).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn e2e_explicit_format_and_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let form = write_form_with_images(temp_dir.path(), 2);
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[layout]\nstate_abbreviation = \"GA\"\n").unwrap();

    let output = temp_dir.path().join("page.out");
    let mut explicit = args(&form, &output);
    explicit.format = Some(OutputFormat::Svg);
    explicit.config = Some(config.to_string_lossy().to_string());
    run(&explicit).expect("Run failed");

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("TAMPA, GA, 33601"));
}

#[test]
fn e2e_missing_form() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("attachment.pdf");

    let err = run(&args(&temp_dir.path().join("absent.toml"), &output)).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}
