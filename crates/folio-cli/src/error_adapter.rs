//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::{fmt, io};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use folio::{FolioError, MAX_IMAGES, export};

use crate::{CliError, config::ConfigError};

/// Adapter giving every [`CliError`] a stable diagnostic code and, where one
/// helps, a hint.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(ConfigError::Parse { .. }) => "folio::config::parse",
            CliError::Config(ConfigError::MissingFile(_)) => "folio::config::missing_file",
            CliError::Config(ConfigError::Read { .. }) => "folio::config::read",
            CliError::Folio(FolioError::InvalidInput { .. }) => "folio::invalid_input",
            CliError::Folio(FolioError::ImageDecode { .. }) => "folio::image_decode",
            CliError::Folio(FolioError::Render { .. }) => "folio::render",
            CliError::Folio(FolioError::AlreadyRendered(_)) => "folio::already_rendered",
            CliError::ReplaceOutput { .. } => "folio::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Folio(FolioError::InvalidInput { .. }) => format!(
                "Field labels and image paths must be unique, a page holds at most \
                 {MAX_IMAGES} images, and the [layout] sizes must fit the page"
            ),
            CliError::Folio(FolioError::Render {
                source: export::Error::Io(err),
                ..
            }) if err.kind() == io::ErrorKind::AlreadyExists => {
                "Pass --force to replace the existing file".to_string()
            }
            CliError::Config(ConfigError::MissingFile(_)) => {
                "Check the path passed on the command line".to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn code(err: &CliError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    #[test]
    fn test_codes_are_stable() {
        let invalid = CliError::from(FolioError::invalid_input("images", "too many"));
        assert_eq!(code(&invalid), "folio::invalid_input");

        let missing = CliError::from(ConfigError::MissingFile(PathBuf::from("form.toml")));
        assert_eq!(code(&missing), "folio::config::missing_file");

        let rendered = CliError::from(FolioError::AlreadyRendered(PathBuf::from("a.pdf")));
        assert_eq!(code(&rendered), "folio::already_rendered");
    }

    #[test]
    fn test_existing_output_suggests_force() {
        let io_err = io::Error::new(io::ErrorKind::AlreadyExists, "exists");
        let err = CliError::from(FolioError::render("attachment.pdf", io_err));

        let help = ErrorAdapter(&err).help().unwrap().to_string();
        assert!(help.contains("--force"));
    }

    #[test]
    fn test_report_renders_message_and_code() {
        let err = CliError::from(FolioError::invalid_input(
            "city",
            "field label appears more than once",
        ));

        let mut report = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut report, &ErrorAdapter(&err))
            .unwrap();

        assert!(report.contains("folio::invalid_input"));
        assert!(report.contains("appears more than once"));
    }
}
