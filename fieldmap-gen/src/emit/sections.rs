//! Section generators for the mapper file.

use fieldmap::relation::references_alias;
use fieldmap::{AliasRegistry, ArrayHelper, FieldMappingRule, MappingPlan};

use super::SignatureTypes;

const INDENT: &str = "    ";

/// File header. Carries no timestamp so identical input renders identically.
pub(super) fn header(config_name: &str) -> String {
    format!(
        "// @generated by fieldmap-gen from {config_name}.\n\
         // Do not edit by hand; change the configuration and regenerate.\n"
    )
}

/// One `use` line per registered alias, sorted by alias.
pub(super) fn imports(registry: &AliasRegistry) -> String {
    let mut output = String::new();
    for (alias, path) in registry.imports() {
        let is_plain = path == alias || path.ends_with(&format!("::{alias}"));
        if is_plain {
            output.push_str(&format!("use {path};\n"));
        } else {
            output.push_str(&format!("use {path} as {alias};\n"));
        }
    }
    output
}

/// An element-wise vector conversion function.
pub(super) fn helper(helper: &ArrayHelper) -> String {
    format!(
        "fn {name}(src: &[{source}]) -> Vec<{dest}> {{\n{INDENT}{body}\n}}\n",
        name = helper.name(),
        source = helper.source_element(),
        dest = helper.dest_element(),
        body = helper.body(),
    )
}

/// The single-record mapper.
pub(super) fn mapper(plan: &MappingPlan, types: &SignatureTypes) -> String {
    let dst = &plan.destination_alias;
    let params = plan
        .sources
        .iter()
        .zip(&types.sources)
        .map(|(binding, type_name)| format!("{}: Option<&{type_name}>", binding.alias))
        .collect::<Vec<_>>()
        .join(", ");
    let source_list = plan
        .sources
        .iter()
        .map(|binding| format!("`{}`", binding.alias))
        .collect::<Vec<_>>()
        .join(", ");

    let mut output = format!(
        "/// Builds a `{dest}` from {source_list}.\n\
         ///\n\
         /// Returns `None` when every source is absent.\n\
         pub fn {name}({params}) -> Option<{dest}> {{\n\
         {INDENT}let mut {dst}: Option<{dest}> = None;\n",
        dest = types.destination,
        name = plan.mapper_name,
    );
    for binding in &plan.sources {
        output.push_str(&source_block(plan, &binding.alias));
    }
    output.push_str(&manual_block(plan));
    for rule in plan.unresolved() {
        let shape = plan
            .destination
            .field(&rule.dest_field)
            .map(|field| field.shape.to_string())
            .unwrap_or_default();
        output.push_str(&format!(
            "{INDENT}// {dst}.{}: no source field converts to {shape}\n",
            rule.dest_field
        ));
    }
    output.push_str(&format!("{INDENT}{dst}\n}}\n"));
    output
}

/// Applies the automatic rules derived from the source bound to `alias`.
fn source_block(plan: &MappingPlan, alias: &str) -> String {
    let dst = &plan.destination_alias;
    let rules: Vec<&FieldMappingRule> = plan.automatic_rules_for(alias).collect();
    if rules.is_empty() {
        return format!(
            "{INDENT}if {alias}.is_some() && {dst}.is_none() {{\n\
             {INDENT}{INDENT}{dst} = Some(Default::default());\n\
             {INDENT}}}\n"
        );
    }
    let mut output = format!(
        "{INDENT}if let Some({alias}) = {alias} {{\n\
         {INDENT}{INDENT}let {dst} = {dst}.get_or_insert_with(Default::default);\n"
    );
    for rule in rules {
        output.push_str(&assignment(dst, rule));
    }
    output.push_str(&format!("{INDENT}}}\n"));
    output
}

/// Applies manual relations, one block per distinct set of sources the
/// relations mention.
///
/// A block runs when every source it mentions is present. Relations that
/// mention no source run whenever the destination has been allocated.
fn manual_block(plan: &MappingPlan) -> String {
    let mut groups: Vec<(Vec<&str>, Vec<&FieldMappingRule>)> = Vec::new();
    for rule in plan.manual_rules() {
        let mentioned: Vec<&str> = plan
            .sources
            .iter()
            .map(|binding| binding.alias.as_str())
            .filter(|alias| mentions(rule, alias))
            .collect();
        match groups.iter_mut().find(|(aliases, _)| *aliases == mentioned) {
            Some((_, rules)) => rules.push(rule),
            None => groups.push((mentioned, vec![rule])),
        }
    }
    groups
        .iter()
        .map(|(aliases, rules)| relation_group(&plan.destination_alias, aliases, rules))
        .collect()
}

fn relation_group(dst: &str, aliases: &[&str], rules: &[&FieldMappingRule]) -> String {
    let opening = match aliases {
        [] => format!("{INDENT}if let Some({dst}) = {dst}.as_mut() {{\n"),
        [alias] => format!(
            "{INDENT}if let Some({alias}) = {alias} {{\n\
             {INDENT}{INDENT}let {dst} = {dst}.get_or_insert_with(Default::default);\n"
        ),
        _ => {
            let patterns: Vec<String> = aliases
                .iter()
                .map(|alias| format!("Some({alias})"))
                .collect();
            format!(
                "{INDENT}if let ({}) = ({}) {{\n\
                 {INDENT}{INDENT}let {dst} = {dst}.get_or_insert_with(Default::default);\n",
                patterns.join(", "),
                aliases.join(", "),
            )
        }
    };
    let mut output = opening;
    for rule in rules {
        if rule.ambiguous_provenance {
            output.push_str(&format!(
                "{INDENT}{INDENT}// Guard for {dst}.{} was inferred from several candidates.\n",
                rule.dest_field
            ));
        }
        output.push_str(&assignment(dst, rule));
    }
    output.push_str(&format!("{INDENT}}}\n"));
    output
}

/// One assignment inside a bound block, behind a presence check when the
/// source field is optional.
fn assignment(dst: &str, rule: &FieldMappingRule) -> String {
    let expression = rule.expression.as_deref().unwrap_or_default();
    let statement = format!("{dst}.{} = {expression};", rule.dest_field);
    match rule.guard() {
        Some(guard) => format!(
            "{INDENT}{INDENT}if {guard}.is_some() {{\n\
             {INDENT}{INDENT}{INDENT}{statement}\n\
             {INDENT}{INDENT}}}\n"
        ),
        None => format!("{INDENT}{INDENT}{statement}\n"),
    }
}

/// Whether a rule's expression or guard references `alias`.
fn mentions(rule: &FieldMappingRule, alias: &str) -> bool {
    let guard = rule.guard().unwrap_or_default();
    references_alias(rule.expression.as_deref().unwrap_or_default(), alias)
        || references_alias(&guard, alias)
}

/// The batch mapper zipping equally indexed sources.
pub(super) fn list_mapper(plan: &MappingPlan, types: &SignatureTypes) -> String {
    let params = plan
        .sources
        .iter()
        .zip(&types.sources)
        .map(|(binding, type_name)| format!("{}: &[Option<&{type_name}>]", binding.alias))
        .collect::<Vec<_>>()
        .join(", ");
    let mut aliases = plan.sources.iter().map(|binding| binding.alias.as_str());
    let first = aliases.next().unwrap_or_default();
    let mut chain = format!("{first}.iter()");
    let mut pattern = first.to_owned();
    for alias in aliases {
        chain.push_str(&format!("\n{INDENT}{INDENT}.zip({alias})"));
        pattern = format!("({pattern}, {alias})");
    }
    let arguments = plan
        .sources
        .iter()
        .map(|binding| format!("*{}", binding.alias))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "/// Applies [`{mapper}`] to equally indexed sources, stopping at the\n\
         /// shortest input.\n\
         pub fn {name}({params}) -> Vec<Option<{dest}>> {{\n\
         {INDENT}{chain}\n\
         {INDENT}{INDENT}.map(|{pattern}| {mapper}({arguments}))\n\
         {INDENT}{INDENT}.collect()\n\
         }}\n",
        mapper = plan.mapper_name,
        name = plan.list_mapper_name,
        dest = types.destination,
    )
}
