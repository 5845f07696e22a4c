//! The generation pipeline: configuration to rendered output.

use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use fieldmap::{MappingPlan, MappingSpec};
use tracing::{debug, info, warn};

use crate::config::{self, MapperConfig, MappersConfig, TypePath};
use crate::emit;
use crate::error::GenError;
use crate::fs_helpers::parent_or_current;
use crate::introspect::TypeLocator;
use crate::output;

/// Output formats supported by `fieldmap-gen`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Emit Rust mapper functions.
    #[default]
    Rust,
    /// Emit the resolved mapping plans as JSON.
    Plan,
}

/// Inputs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Configuration file.
    pub config: Utf8PathBuf,
    /// Target file.
    pub output: Utf8PathBuf,
    /// What to render.
    pub format: OutputFormat,
}

impl GenerateOptions {
    /// Options reading `config` and writing Rust to `mappers_gen.rs`.
    #[must_use]
    pub fn new(config: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config: config.into(),
            output: Utf8PathBuf::from("mappers_gen.rs"),
            format: OutputFormat::Rust,
        }
    }

    /// Sets the target file.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<Utf8PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Loads the configuration, resolves every mapper and renders the output
/// without writing it.
///
/// # Errors
///
/// Returns a [`GenError`] for unreadable or invalid configuration, types that
/// cannot be described, and invalid mapping specifications.
pub fn generate(options: &GenerateOptions) -> Result<String, GenError> {
    let mappers = config::load(&options.config)?;
    let plans = plan_all(&mappers, parent_or_current(&options.config))?;
    match options.format {
        OutputFormat::Rust => {
            let config_name = options.config.file_name().unwrap_or(options.config.as_str());
            emit::render_rust(&plans, &mappers.imports, config_name)
        }
        OutputFormat::Plan => emit::render_plans_json(&plans),
    }
}

/// Renders the output and writes it atomically to `options.output`.
///
/// # Errors
///
/// Returns any error raised by [`generate`] or while writing.
pub fn run(options: &GenerateOptions) -> Result<Utf8PathBuf, GenError> {
    let content = generate(options)?;
    output::write_atomically(&options.output, &content)
}

/// Resolves every configured mapper, in configuration order.
///
/// # Errors
///
/// Returns the first type-resolution or mapping error encountered.
pub fn plan_all(mappers: &MappersConfig, root: &Utf8Path) -> Result<Vec<MappingPlan>, GenError> {
    let mut locator = TypeLocator::new(root);
    let plans = mappers
        .mappers
        .iter()
        .map(|mapper| -> Result<MappingPlan, GenError> {
            let spec = build_spec(mapper, &mut locator)?;
            Ok(MappingPlan::assemble(&spec)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(mappers = plans.len(), root = %root, "mapping plans ready");
    Ok(plans)
}

/// Builds the specification of one mapper.
///
/// Relations are parsed before any type is resolved so malformed relations
/// fail fast.
///
/// # Errors
///
/// Returns malformed relation, type path and type resolution errors.
pub fn build_spec(
    mapper: &MapperConfig,
    locator: &mut TypeLocator,
) -> Result<MappingSpec, GenError> {
    let relations = mapper
        .relations
        .iter()
        .map(config::RelationConfig::to_relation)
        .collect::<Result<Vec<_>, _>>()?;
    if !mapper.map.is_empty() {
        warn!(
            destination = %mapper.destination.path,
            entries = mapper.map.len(),
            "'map' entries are reserved and ignored"
        );
    }

    let destination = locator.locate(&TypePath::parse(&mapper.destination.path)?)?;
    let mut spec = MappingSpec::new(mapper.destination.alias.as_str(), destination);
    if let Some(alias) = &mapper.alias {
        spec = spec.with_alias(alias.as_str());
    }
    for source in &mapper.source {
        let descriptor = locator.locate(&TypePath::parse(&source.path)?)?;
        spec = spec.with_source(source.alias.as_str(), descriptor);
    }
    debug!(
        destination = %spec.destination.name,
        sources = spec.sources.len(),
        relations = relations.len(),
        "mapper specification built"
    );
    Ok(relations
        .into_iter()
        .fold(spec, MappingSpec::with_relation))
}
