//! Rendering of mapping plans into generated source text.
//!
//! The whole file is built in memory. Mapper bodies are rendered first so the
//! alias registry knows every module they reference; the header and `use`
//! lines are prepended afterwards.

mod sections;

use std::collections::{BTreeMap, BTreeSet};

use fieldmap::{AliasRegistry, ArrayHelper, MappingPlan};
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::error::GenError;

/// Type names a mapper's signature uses, as written in the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignatureTypes {
    pub(crate) destination: String,
    pub(crate) sources: Vec<String>,
}

impl SignatureTypes {
    fn register(plan: &MappingPlan, registry: &mut AliasRegistry) -> Self {
        Self {
            destination: registry.qualified_name(&plan.destination),
            sources: plan
                .sources
                .iter()
                .map(|binding| registry.qualified_name(&binding.descriptor))
                .collect(),
        }
    }
}

/// Renders `plans` as one Rust source file.
///
/// `config_name` is recorded in the header. Configured `imports` reserve
/// their aliases before any record module is registered.
///
/// # Errors
///
/// Returns [`GenError::HelperNameClash`] when two distinct element-wise
/// conversions would be emitted under one function name.
pub fn render_rust(
    plans: &[MappingPlan],
    imports: &[ImportConfig],
    config_name: &str,
) -> Result<String, GenError> {
    let mut registry = AliasRegistry::new();
    for import in imports {
        let alias = import.effective_alias();
        if !registry.reserve(alias, &import.path) {
            warn!(alias, path = %import.path, "import alias already in use; import skipped");
        }
    }

    let mut mappers = String::with_capacity(plans.len() * 1024);
    for plan in plans {
        let types = SignatureTypes::register(plan, &mut registry);
        mappers.push('\n');
        mappers.push_str(&sections::mapper(plan, &types));
        mappers.push('\n');
        mappers.push_str(&sections::list_mapper(plan, &types));
    }

    let helpers: BTreeSet<ArrayHelper> = plans.iter().flat_map(MappingPlan::helpers).collect();
    check_helper_names(&helpers)?;

    let mut content = sections::header(config_name);
    if !registry.is_empty() {
        content.push('\n');
        content.push_str(&sections::imports(&registry));
    }
    for helper in &helpers {
        content.push('\n');
        content.push_str(&sections::helper(helper));
    }
    content.push_str(&mappers);

    info!(
        mappers = plans.len(),
        helpers = helpers.len(),
        imports = registry.imports().count(),
        "mappers rendered"
    );
    Ok(content)
}

fn check_helper_names(helpers: &BTreeSet<ArrayHelper>) -> Result<(), GenError> {
    let mut named: BTreeMap<String, &ArrayHelper> = BTreeMap::new();
    for helper in helpers {
        if let Some(existing) = named.insert(helper.name(), helper) {
            return Err(GenError::HelperNameClash {
                name: helper.name(),
                first: describe(existing),
                second: describe(helper),
            });
        }
    }
    Ok(())
}

fn describe(helper: &ArrayHelper) -> String {
    format!("{} -> {}", helper.source_element(), helper.dest_element())
}

/// Renders `plans` as pretty JSON.
///
/// # Errors
///
/// Returns [`GenError::PlanJson`] when serialisation fails.
pub fn render_plans_json(plans: &[MappingPlan]) -> Result<String, GenError> {
    let mut content = serde_json::to_string_pretty(plans)?;
    content.push('\n');
    Ok(content)
}
