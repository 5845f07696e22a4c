//! Mapper specifications and the plans assembled from them.

use std::collections::BTreeSet;

use heck::ToSnakeCase;
use serde::Serialize;
use tracing::{debug, info};

use crate::descriptor::{SourceBinding, StructDescriptor};
use crate::error::FieldmapError;
use crate::helper::ArrayHelper;
use crate::relation::{Relation, apply_relations, is_identifier};
use crate::resolver::resolve;
use crate::rule::{FieldMappingRule, RuleOrigin};

/// One configured mapper: a destination, its sources and manual relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSpec {
    /// Optional prefix for the generated function names.
    pub alias: Option<String>,
    /// Variable name of the destination in generated code.
    pub destination_alias: String,
    /// Destination record.
    pub destination: StructDescriptor,
    /// Sources in configured order.
    pub sources: Vec<SourceBinding>,
    /// Manual relations in configured order.
    pub relations: Vec<Relation>,
}

impl MappingSpec {
    /// Starts a specification for `destination`, bound to `destination_alias`.
    #[must_use]
    pub fn new(destination_alias: impl Into<String>, destination: StructDescriptor) -> Self {
        Self {
            alias: None,
            destination_alias: destination_alias.into(),
            destination,
            sources: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Sets the function-name prefix.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Appends a source; its position is its index in the source list.
    #[must_use]
    pub fn with_source(mut self, alias: impl Into<String>, descriptor: StructDescriptor) -> Self {
        let position = self.sources.len();
        self.sources
            .push(SourceBinding::new(alias, descriptor, position));
        self
    }

    /// Appends a parsed relation.
    #[must_use]
    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Parses and appends a raw relation.
    ///
    /// # Errors
    ///
    /// Returns [`FieldmapError::MalformedRelation`] when `raw` is malformed.
    pub fn with_raw_relation(self, raw: &str) -> Result<Self, FieldmapError> {
        Ok(self.with_relation(Relation::parse(raw)?))
    }

    /// Prefix shared by the generated function names.
    #[must_use]
    pub fn function_prefix(&self) -> String {
        self.alias
            .as_deref()
            .unwrap_or(&self.destination.name)
            .to_snake_case()
    }

    fn validate(&self) -> Result<(), FieldmapError> {
        if self.sources.is_empty() {
            return Err(FieldmapError::MissingSources {
                destination: self.destination.name.clone(),
            });
        }
        let bindings = std::iter::once((&self.destination_alias, &self.destination.name)).chain(
            self.sources
                .iter()
                .map(|binding| (&binding.alias, &binding.descriptor.name)),
        );
        let mut seen = BTreeSet::new();
        for (alias, type_name) in bindings {
            if !is_identifier(alias) {
                return Err(FieldmapError::InvalidAlias {
                    alias: alias.clone(),
                    type_name: type_name.clone(),
                });
            }
            if !seen.insert(alias.as_str()) {
                return Err(FieldmapError::DuplicateAlias {
                    alias: alias.clone(),
                    destination: self.destination.name.clone(),
                });
            }
        }
        for relation in &self.relations {
            if self.destination.field(&relation.dest_field).is_none() {
                return Err(FieldmapError::UnknownRelationTarget {
                    relation: relation.raw.clone(),
                    field: relation.dest_field.clone(),
                    destination: self.destination.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The resolved rules of one mapper, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingPlan {
    /// Name of the single-record mapper function.
    pub mapper_name: String,
    /// Name of the batch mapper function.
    pub list_mapper_name: String,
    /// Variable name of the destination.
    pub destination_alias: String,
    /// Destination record.
    pub destination: StructDescriptor,
    /// Sources sorted by position.
    pub sources: Vec<SourceBinding>,
    /// One rule per destination field, in declaration order.
    pub rules: Vec<FieldMappingRule>,
}

impl MappingPlan {
    /// Resolves `spec` into a plan.
    ///
    /// The specification is validated first, then destination fields are
    /// resolved automatically and relations are folded over the result in
    /// configured order.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldmapError`] when the specification is invalid: no
    /// sources, bad or repeated aliases, relations naming unknown fields or
    /// unknown guards.
    pub fn assemble(spec: &MappingSpec) -> Result<Self, FieldmapError> {
        spec.validate()?;
        let mut sources = spec.sources.clone();
        sources.sort_by_key(|binding| binding.position);

        let automatic = resolve(&spec.destination, &sources);
        let rules = apply_relations(automatic, &spec.relations, &spec.destination, &sources)?;
        for rule in &rules {
            debug!(
                destination = %spec.destination.name,
                field = %rule.dest_field,
                origin = ?rule.origin,
                expression = rule.expression.as_deref().unwrap_or("-"),
                "field rule"
            );
        }

        let prefix = spec.function_prefix();
        let plan = Self {
            mapper_name: format!("{prefix}_mapper"),
            list_mapper_name: format!("{prefix}_list_mapper"),
            destination_alias: spec.destination_alias.clone(),
            destination: spec.destination.clone(),
            sources,
            rules,
        };
        info!(
            mapper = %plan.mapper_name,
            resolved = plan.resolved().count(),
            unresolved = plan.unresolved().count(),
            "mapping plan assembled"
        );
        Ok(plan)
    }

    /// The rule for `dest_field`.
    #[must_use]
    pub fn rule(&self, dest_field: &str) -> Option<&FieldMappingRule> {
        self.rules.iter().find(|rule| rule.dest_field == dest_field)
    }

    /// Rules with an expression.
    pub fn resolved(&self) -> impl Iterator<Item = &FieldMappingRule> {
        self.rules.iter().filter(|rule| rule.resolved)
    }

    /// Rules nothing could populate; emitters render them as inert markers.
    pub fn unresolved(&self) -> impl Iterator<Item = &FieldMappingRule> {
        self.rules.iter().filter(|rule| !rule.resolved)
    }

    /// Automatic rules derived from the source bound to `alias`.
    pub fn automatic_rules_for<'a>(
        &'a self,
        alias: &'a str,
    ) -> impl Iterator<Item = &'a FieldMappingRule> + 'a {
        self.rules.iter().filter(move |rule| {
            rule.origin == RuleOrigin::Automatic && rule.source_alias.as_deref() == Some(alias)
        })
    }

    /// Rules written as manual relations.
    pub fn manual_rules(&self) -> impl Iterator<Item = &FieldMappingRule> {
        self.rules
            .iter()
            .filter(|rule| rule.origin == RuleOrigin::Manual)
    }

    /// Distinct element-wise helpers the plan's expressions call.
    #[must_use]
    pub fn helpers(&self) -> BTreeSet<ArrayHelper> {
        self.rules
            .iter()
            .filter_map(|rule| rule.helper.clone())
            .collect()
    }
}
