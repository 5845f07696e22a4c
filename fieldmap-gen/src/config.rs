//! Mapper configuration files.
//!
//! The configuration is YAML, read with `serde-saphyr` using strict boolean
//! semantics. Paths to record types are written as `<file>.<Type>`, relative
//! to the directory holding the configuration file, with the `.rs` extension
//! omitted.

use camino::{Utf8Path, Utf8PathBuf};
use fieldmap::descriptor::is_primitive;
use fieldmap::relation::is_identifier;
use fieldmap::{FieldmapError, Relation};
use serde::Deserialize;
use serde_saphyr::Options;

use crate::error::GenError;
use crate::fs_helpers;

/// Root of a mapper configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappersConfig {
    /// Extra `use` declarations for the generated file.
    #[serde(default)]
    pub imports: Vec<ImportConfig>,
    /// Mappers in generation order.
    #[serde(default)]
    pub mappers: Vec<MapperConfig>,
}

/// An extra import required by hand-written relation expressions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Name to import under; defaults to the last path segment.
    #[serde(default)]
    pub alias: Option<String>,
    /// Full path of the imported item.
    pub path: String,
}

impl ImportConfig {
    /// Alias the import is bound to.
    #[must_use]
    pub fn effective_alias(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| self.path.rsplit("::").next().unwrap_or(&self.path))
    }
}

/// A record bound to an alias.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Variable name used in generated code and relation expressions.
    pub alias: String,
    /// Type path, for example `src/models/user.User`.
    pub path: String,
}

/// One mapper to generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfig {
    /// Prefix for the generated function names.
    #[serde(default)]
    pub alias: Option<String>,
    /// Record being built.
    pub destination: BindingConfig,
    /// Records read from, in priority order; later sources win.
    pub source: Vec<BindingConfig>,
    /// Reserved; accepted and ignored.
    #[serde(default)]
    pub map: Vec<String>,
    /// Manual relations applied after automatic matching.
    #[serde(default)]
    pub relations: Vec<RelationConfig>,
}

/// A manual relation as written in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RelationConfig {
    /// `"[alias.]field: expression"`.
    Raw(String),
    /// Separate target and expression, optionally with an explicit guard.
    Detailed(DetailedRelation),
}

/// The map form of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedRelation {
    /// Destination field, optionally prefixed with the destination alias.
    pub to: String,
    /// Expression assigned to the field.
    pub from: String,
    /// `alias.field` whose presence guards the assignment.
    #[serde(default)]
    pub guard: Option<String>,
}

impl RelationConfig {
    /// Parses the configured relation.
    ///
    /// # Errors
    ///
    /// Returns [`FieldmapError::MalformedRelation`] when the relation cannot
    /// be split into a target and an expression.
    pub fn to_relation(&self) -> Result<Relation, FieldmapError> {
        match self {
            Self::Raw(raw) => Relation::parse(raw),
            Self::Detailed(detailed) => {
                let raw = format!("{}: {}", detailed.to, detailed.from);
                let relation = Relation::from_parts(&raw, &detailed.to, &detailed.from)?;
                Ok(match &detailed.guard {
                    Some(guard) => relation.with_guard(guard.trim()),
                    None => relation,
                })
            }
        }
    }
}

/// Where a configured record type is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePath {
    /// A primitive used as a zero-field record.
    Primitive(String),
    /// A struct declared in a source file.
    Record {
        /// Source file relative to the configuration directory.
        file: Utf8PathBuf,
        /// Struct name.
        type_name: String,
    },
}

impl TypePath {
    /// Parses `<file>.<Type>` or a primitive name.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidTypePath`] when the text has no file part
    /// or the type name is not an identifier.
    pub fn parse(raw: &str) -> Result<Self, GenError> {
        let text = raw.trim();
        if is_primitive(text) {
            return Ok(Self::Primitive(text.to_owned()));
        }
        let invalid = || GenError::InvalidTypePath(raw.to_owned());
        let (file, type_name) = text.rsplit_once('.').ok_or_else(invalid)?;
        if file.is_empty() || file.ends_with('/') || !is_identifier(type_name) {
            return Err(invalid());
        }
        Ok(Self::Record {
            file: Utf8PathBuf::from(format!("{file}.rs")),
            type_name: type_name.to_owned(),
        })
    }
}

/// Reads and parses the configuration at `path`.
///
/// # Errors
///
/// Returns [`GenError::Io`] when the file cannot be read and
/// [`GenError::Config`] when it does not match the schema.
pub fn load(path: &Utf8Path) -> Result<MappersConfig, GenError> {
    let contents = fs_helpers::read_to_string(path)?;
    parse(path, &contents)
}

/// Parses configuration text; `path` is used for diagnostics only.
///
/// # Errors
///
/// Returns [`GenError::Config`] when `contents` does not match the schema.
pub fn parse(path: &Utf8Path, contents: &str) -> Result<MappersConfig, GenError> {
    serde_saphyr::from_str_with_options(
        contents,
        Options {
            strict_booleans: true,
            ..Options::default()
        },
    )
    .map_err(|source| GenError::Config {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
