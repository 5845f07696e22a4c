//! Resolved per-field mapping rules.

use serde::Serialize;

use crate::descriptor::SourceBinding;
use crate::helper::ArrayHelper;
use crate::matcher::Conversion;

/// How a rule came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrigin {
    /// Derived by name matching against a source field.
    Automatic,
    /// Written by hand as a relation.
    Manual,
    /// No source or relation could populate the field.
    Unmatched,
}

/// The source field a rule reads from, used to decide on presence guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// Alias of the contributing source.
    pub alias: String,
    /// Name of the contributing source field.
    pub field: String,
    /// Whether the source field is optional.
    pub is_pointer: bool,
    /// Whether inference saw more than one plausible candidate.
    pub ambiguous: bool,
}

/// The resolved outcome for one destination field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMappingRule {
    /// Destination field name.
    pub dest_field: String,
    /// Whether an expression populates the field.
    pub resolved: bool,
    /// Where the rule came from.
    pub origin: RuleOrigin,
    /// Alias of the contributing source, when known.
    pub source_alias: Option<String>,
    /// Contributing source field, when known.
    pub source_field: Option<String>,
    /// Whether the contributing source field is optional. Assignments from
    /// optional fields are emitted behind a presence check.
    pub source_is_pointer: bool,
    /// Right-hand side of the assignment.
    pub expression: Option<String>,
    /// Element-wise helper called by `expression`.
    pub helper: Option<ArrayHelper>,
    /// Set when a manual relation's provenance was inferred from several
    /// plausible candidates.
    pub ambiguous_provenance: bool,
}

impl FieldMappingRule {
    /// A rule for a field nothing could populate.
    #[must_use]
    pub fn unmatched(dest_field: impl Into<String>) -> Self {
        Self {
            dest_field: dest_field.into(),
            resolved: false,
            origin: RuleOrigin::Unmatched,
            source_alias: None,
            source_field: None,
            source_is_pointer: false,
            expression: None,
            helper: None,
            ambiguous_provenance: false,
        }
    }

    /// A rule derived from `binding`'s field `source_field` through
    /// `conversion`.
    #[must_use]
    pub fn automatic(
        dest_field: &str,
        binding: &SourceBinding,
        source_field: &str,
        source_is_pointer: bool,
        conversion: Conversion,
    ) -> Self {
        let helper = conversion.helper().cloned();
        Self {
            dest_field: dest_field.to_owned(),
            resolved: true,
            origin: RuleOrigin::Automatic,
            source_alias: Some(binding.alias.clone()),
            source_field: Some(source_field.to_owned()),
            source_is_pointer,
            expression: Some(conversion.expression),
            helper,
            ambiguous_provenance: false,
        }
    }

    /// A rule written by hand. Provenance is optional because arbitrary
    /// expressions need not reference a recognisable source field.
    #[must_use]
    pub fn manual(dest_field: &str, expression: &str, provenance: Option<Provenance>) -> Self {
        let mut rule = Self {
            resolved: true,
            origin: RuleOrigin::Manual,
            expression: Some(expression.to_owned()),
            ..Self::unmatched(dest_field)
        };
        if let Some(found) = provenance {
            rule.source_alias = Some(found.alias);
            rule.source_field = Some(found.field);
            rule.source_is_pointer = found.is_pointer;
            rule.ambiguous_provenance = found.ambiguous;
        }
        rule
    }

    /// Reference checked for presence before assigning, if one is needed.
    #[must_use]
    pub fn guard(&self) -> Option<String> {
        if !self.source_is_pointer {
            return None;
        }
        match (&self.source_alias, &self.source_field) {
            (Some(alias), Some(field)) => Some(format!("{alias}.{field}")),
            _ => None,
        }
    }
}
