//! Command-line argument definitions for the Folio CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the form file, the output path and
//! format, the configuration file, and logging verbosity.

use clap::Parser;

use folio::export::OutputFormat;

/// Command-line arguments for the Folio attachment page generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the form file (TOML) listing fields and images
    #[arg(help = "Path to the form file")]
    pub input: String,

    /// Path to the output page
    #[arg(short, long, default_value = "attachment.pdf")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format (pdf, svg); inferred from the output extension if omitted
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub force: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["folio", "form.toml"]).unwrap();

        assert_eq!(args.input, "form.toml");
        assert_eq!(args.output, "attachment.pdf");
        assert_eq!(args.config, None);
        assert_eq!(args.format, None);
        assert!(!args.force);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "folio",
            "form.toml",
            "-o",
            "page.out",
            "-c",
            "folio.toml",
            "--format",
            "svg",
            "--force",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.output, "page.out");
        assert_eq!(args.config.as_deref(), Some("folio.toml"));
        assert_eq!(args.format, Some(OutputFormat::Svg));
        assert!(args.force);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["folio", "form.toml", "--format", "png"]).is_err());
    }
}
