//! Folio CLI library
//!
//! This module contains the core CLI logic for the Folio attachment page
//! generator.

pub mod error_adapter;
pub mod form;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;
pub use error_adapter::ErrorAdapter;

use std::{fs, io, path::Path};

use log::{info, warn};

use folio::{DocumentLayoutEngine, export::OutputFormat};

/// Run the Folio CLI application
///
/// Loads the configuration and the form, lays out the page and writes it to
/// the output path. Images that cannot be decoded are left out and logged.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration or form file errors
/// - Invalid fields, images or layout settings
/// - Output file errors, including an existing output without `--force`
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Generating attachment page"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let form = form::load_form(&args.input)?;

    let mut engine = DocumentLayoutEngine::new(form.fields, form.images, app_config)?;

    let output = Path::new(&args.output);
    if args.force {
        remove_existing(output)?;
    }

    let format = args
        .format
        .or_else(|| OutputFormat::from_path(output))
        .unwrap_or_default();
    engine.render_as(output, format)?;

    for skipped in engine.skipped_images() {
        warn!(err:err = *skipped; "Image left out of the page");
    }

    info!(
        output_file = args.output,
        format:%,
        images = engine.images().len(),
        skipped = engine.skipped_images().len();
        "Attachment page exported successfully"
    );

    Ok(())
}

fn remove_existing(path: &Path) -> Result<(), CliError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path:? = path; "Removed existing output");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CliError::ReplaceOutput {
            path: path.to_path_buf(),
            source,
        }),
    }
}
