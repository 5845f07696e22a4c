//! CLI entrypoint for `fieldmap-gen`.

mod cli;

use clap::Parser;
use fieldmap_gen::GenError;
use tracing::error;

use crate::cli::Args;

fn main() -> Result<(), GenError> {
    let args = Args::parse();
    fieldmap_gen::logging::init(args.verbosity)?;
    fieldmap_gen::run(&args.options())
        .map(|_| ())
        .inspect_err(|err| error!(error = %err, "generation failed"))
}
