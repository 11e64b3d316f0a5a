//! Errors surfaced by the CLI.

use std::{io, path::PathBuf};

use thiserror::Error;

use folio::FolioError;

use crate::config::ConfigError;

/// Any failure of a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Folio(#[from] FolioError),

    #[error("Failed to replace existing output `{}`: {source}", .path.display())]
    ReplaceOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
