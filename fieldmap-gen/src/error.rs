//! Error types for `fieldmap-gen`.

use camino::Utf8PathBuf;
use fieldmap::FieldmapError;
use thiserror::Error;

/// Errors surfaced by the `fieldmap-gen` pipeline.
///
/// Every variant aborts the run before any output is written.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected schema.
    #[error("mapping configuration {path} is invalid: {source}")]
    Config {
        /// Configuration file.
        path: Utf8PathBuf,
        /// Deserialisation failure.
        #[source]
        source: Box<serde_saphyr::Error>,
    },

    /// A referenced Rust source file does not parse.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Source file.
        path: Utf8PathBuf,
        /// Parser failure.
        #[source]
        source: syn::Error,
    },

    /// A type path is not of the form `<file>.<Type>` or a primitive name.
    #[error("invalid type path '{0}'; expected '<file path>.<TypeName>' or a primitive")]
    InvalidTypePath(String),

    /// No top-level item with the requested name exists in the file.
    #[error("type '{type_name}' not found in {path}")]
    TypeNotFound {
        /// Requested type.
        type_name: String,
        /// File searched.
        path: Utf8PathBuf,
    },

    /// The named item exists but is not a struct.
    #[error("'{type_name}' in {path} is not a struct")]
    NotAStruct {
        /// Requested type.
        type_name: String,
        /// File searched.
        path: Utf8PathBuf,
    },

    /// The named struct has positional fields.
    #[error("'{type_name}' in {path} is a tuple struct; only named fields can be mapped")]
    TupleStruct {
        /// Requested type.
        type_name: String,
        /// File searched.
        path: Utf8PathBuf,
    },

    /// The mapping configuration is semantically invalid.
    #[error(transparent)]
    Mapping(#[from] FieldmapError),

    /// Two distinct element-wise conversions derived the same helper name.
    #[error("helpers '{first}' and '{second}' would both be named '{name}'")]
    HelperNameClash {
        /// Shared function name.
        name: String,
        /// First conversion, as `source -> dest` element types.
        first: String,
        /// Second conversion.
        second: String,
    },

    /// Plans could not be serialised.
    #[error("failed to serialise mapping plans: {0}")]
    PlanJson(#[from] serde_json::Error),

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl GenError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
