//! Command-line interface definitions for `fieldmap-gen`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use fieldmap_gen::{GenerateOptions, OutputFormat};

/// Parsed CLI arguments for `fieldmap-gen`.
#[derive(Debug, Parser)]
#[command(name = "fieldmap-gen")]
#[command(about = "Generate field-by-field struct mappers from a YAML description")]
#[command(version)]
pub struct Args {
    /// Mapper configuration file.
    #[arg(short = 'c', long, value_name = "path", default_value = "mappers.yml")]
    pub config: Utf8PathBuf,
    /// Generated file.
    #[arg(short = 'o', long, value_name = "path", default_value = "mappers_gen.rs")]
    pub output: Utf8PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Rust)]
    pub format: OutputFormat,
    /// Increase log verbosity (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Pipeline options described by the arguments.
    #[must_use]
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions::new(self.config.clone())
            .with_output(self.output.clone())
            .with_format(self.format)
    }
}
