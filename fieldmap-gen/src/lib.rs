//! Library interface for the `fieldmap-gen` mapper generator.
//!
//! The generator reads a YAML description of mappers, describes the named
//! record types by parsing their Rust source files, resolves each mapper into
//! a [`fieldmap::MappingPlan`] and renders the plans as Rust functions.
//!
//! Build scripts can call [`generate`] and write the result into `OUT_DIR`:
//!
//! ```no_run
//! use fieldmap_gen::{GenerateOptions, generate};
//!
//! let code = generate(&GenerateOptions::new("mappers.yml"))?;
//! assert!(code.starts_with("// @generated"));
//! # Ok::<(), fieldmap_gen::GenError>(())
//! ```

pub mod config;
pub mod emit;
pub mod error;
mod fs_helpers;
pub mod introspect;
pub mod logging;
pub mod output;
mod pipeline;

pub use error::GenError;
pub use pipeline::{GenerateOptions, OutputFormat, build_spec, generate, plan_all, run};
