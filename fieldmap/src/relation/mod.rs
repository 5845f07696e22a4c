//! Manual relations and how they override automatic rules.
//!
//! A relation has the form `[alias.]field: <expression>`. The expression is
//! emitted verbatim as the right-hand side of the assignment. To keep presence
//! guards correct, the source field an expression reads from is inferred by
//! substring search unless the relation names an explicit guard.

use serde::Serialize;
use tracing::{debug, warn};

use crate::descriptor::{FieldDescriptor, SourceBinding, StructDescriptor};
use crate::error::FieldmapError;
use crate::rule::{FieldMappingRule, Provenance};

/// A parsed manual relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    /// Relation text as configured, kept for diagnostics.
    pub raw: String,
    /// Destination alias prefix, if written. Informational only.
    pub dest_alias: Option<String>,
    /// Destination field the relation populates.
    pub dest_field: String,
    /// Verbatim right-hand side expression.
    pub expression: String,
    /// Explicit `alias.field` whose presence guards the assignment.
    pub guard: Option<String>,
}

impl Relation {
    /// Parses `[alias.]field: expression`.
    ///
    /// The separator is the single `:` that is not part of a `::` path
    /// separator, so expressions such as `i64::from(a.count)` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FieldmapError::MalformedRelation`] when there is not exactly
    /// one separator or either side is empty.
    pub fn parse(raw: &str) -> Result<Self, FieldmapError> {
        let separators = lone_colons(raw);
        let [index] = separators.as_slice() else {
            return Err(FieldmapError::malformed(
                raw,
                format!(
                    "expected exactly one ':' separator, found {}",
                    separators.len()
                ),
            ));
        };
        let (target, rest) = raw.split_at(*index);
        let expression = rest.strip_prefix(':').unwrap_or(rest);
        Self::from_parts(raw, target, expression)
    }

    /// Builds a relation from an already separated target and expression.
    ///
    /// # Errors
    ///
    /// Returns [`FieldmapError::MalformedRelation`] when either part is empty
    /// or the target field is not an identifier.
    pub fn from_parts(raw: &str, target: &str, expression: &str) -> Result<Self, FieldmapError> {
        let target_text = target.trim();
        let expression_text = expression.trim();
        if expression_text.is_empty() {
            return Err(FieldmapError::malformed(raw, "expression is empty"));
        }
        let (dest_alias, dest_field) = match target_text.rsplit_once('.') {
            Some((alias, field)) => (Some(alias.trim().to_owned()), field.trim()),
            None => (None, target_text),
        };
        if !is_identifier(dest_field) {
            return Err(FieldmapError::malformed(
                raw,
                format!("destination field '{dest_field}' is not an identifier"),
            ));
        }
        Ok(Self {
            raw: raw.to_owned(),
            dest_alias,
            dest_field: dest_field.to_owned(),
            expression: expression_text.to_owned(),
            guard: None,
        })
    }

    /// Names the source field whose presence guards this relation, replacing
    /// inference.
    #[must_use]
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    /// Determines the relation's provenance: the explicit guard when present,
    /// otherwise the inferred source field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldmapError::UnknownGuard`] when an explicit guard does not
    /// name a field of a configured source.
    pub fn provenance(&self, sources: &[SourceBinding]) -> Result<Option<Provenance>, FieldmapError> {
        match &self.guard {
            Some(guard) => explicit_provenance(guard, sources)
                .map(Some)
                .ok_or_else(|| FieldmapError::UnknownGuard {
                    relation: self.raw.clone(),
                    guard: guard.clone(),
                }),
            None => Ok(infer_provenance(&self.expression, sources)),
        }
    }
}

/// Folds `relations` over `rules` in order.
///
/// Each relation unconditionally replaces the rule for its destination field,
/// so later relations win over earlier ones and over automatic rules.
///
/// # Errors
///
/// Returns [`FieldmapError::UnknownRelationTarget`] when a relation names a
/// field the destination does not declare, and propagates guard errors.
pub fn apply_relations(
    mut rules: Vec<FieldMappingRule>,
    relations: &[Relation],
    destination: &StructDescriptor,
    sources: &[SourceBinding],
) -> Result<Vec<FieldMappingRule>, FieldmapError> {
    for relation in relations {
        let slot = rules
            .iter_mut()
            .find(|rule| rule.dest_field == relation.dest_field)
            .ok_or_else(|| FieldmapError::UnknownRelationTarget {
                relation: relation.raw.clone(),
                field: relation.dest_field.clone(),
                destination: destination.name.clone(),
            })?;
        let provenance = relation.provenance(sources)?;
        if let Some(found) = provenance.as_ref().filter(|found| found.ambiguous) {
            warn!(
                relation = %relation.raw,
                alias = %found.alias,
                field = %found.field,
                "relation provenance is ambiguous; add an explicit guard to override"
            );
        }
        debug!(
            field = %relation.dest_field,
            replaced = slot.resolved,
            "applying manual relation"
        );
        *slot = FieldMappingRule::manual(&relation.dest_field, &relation.expression, provenance);
    }
    Ok(rules)
}

/// Infers which source field an expression reads from.
///
/// Sources whose alias occurs in the expression as a whole identifier, and
/// not behind a `.`, are candidates. The first candidate (in configured
/// order) with a referenced field is selected. Within it, a field whose
/// `alias.field` equals the whole expression wins; otherwise the longest
/// `alias.field` occurring as a whole token is chosen. The result is flagged
/// ambiguous when several aliases are referenced or when several fields
/// occur.
#[must_use]
pub fn infer_provenance(expression: &str, sources: &[SourceBinding]) -> Option<Provenance> {
    let mut candidates: Vec<&SourceBinding> = sources
        .iter()
        .filter(|binding| references_alias(expression, &binding.alias))
        .collect();
    candidates.sort_by_key(|binding| binding.position);
    let alias_ambiguous = candidates.len() > 1;

    let (binding, field) = candidates.into_iter().find_map(|binding| {
        referenced_field(expression, binding).map(|field| (binding, field))
    })?;

    let token_matches = binding
        .descriptor
        .fields
        .iter()
        .filter(|candidate| occurs_as_token(expression, &binding.field_ref(&candidate.name)))
        .count();

    Some(Provenance {
        alias: binding.alias.clone(),
        field: field.name.clone(),
        is_pointer: field.shape.is_pointer(),
        ambiguous: alias_ambiguous || token_matches > 1,
    })
}

fn referenced_field<'a>(
    expression: &str,
    binding: &'a SourceBinding,
) -> Option<&'a FieldDescriptor> {
    let fields = &binding.descriptor.fields;
    fields
        .iter()
        .find(|field| binding.field_ref(&field.name) == expression)
        .or_else(|| {
            fields
                .iter()
                .filter(|field| occurs_as_token(expression, &binding.field_ref(&field.name)))
                .fold(None, |best: Option<&FieldDescriptor>, field| match best {
                    Some(current) if current.name.len() >= field.name.len() => Some(current),
                    _ => Some(field),
                })
        })
}

fn explicit_provenance(guard: &str, sources: &[SourceBinding]) -> Option<Provenance> {
    let (alias, field_name) = guard.trim().split_once('.')?;
    let binding = sources.iter().find(|binding| binding.alias == alias)?;
    let field = binding.descriptor.field(field_name)?;
    Some(Provenance {
        alias: binding.alias.clone(),
        field: field.name.clone(),
        is_pointer: field.shape.is_pointer(),
        ambiguous: false,
    })
}

/// Byte offsets of `:` characters that are not part of `::`.
fn lone_colons(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(index, byte)| {
            *byte == b':'
                && index.checked_sub(1).and_then(|prev| bytes.get(prev)) != Some(&b':')
                && bytes.get(index + 1) != Some(&b':')
        })
        .map(|(index, _)| index)
        .collect()
}

/// Returns `true` when `needle` occurs in `haystack` with no identifier
/// character directly before or after it.
fn occurs_as_token(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack.get(..start).and_then(|head| head.chars().next_back());
        let after = haystack
            .get(start + matched.len()..)
            .and_then(|tail| tail.chars().next());
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

/// Returns `true` when `alias` occurs in `expression` as a whole identifier
/// that is not a field access on something else.
#[must_use]
pub fn references_alias(expression: &str, alias: &str) -> bool {
    !alias.is_empty()
        && expression.match_indices(alias).any(|(start, matched)| {
            let before = expression
                .get(..start)
                .and_then(|head| head.chars().next_back());
            let after = expression
                .get(start + matched.len()..)
                .and_then(|tail| tail.chars().next());
            !before.is_some_and(|ch| is_ident_char(ch) || ch == '.' || ch == '#')
                && !after.is_some_and(is_ident_char)
        })
}

const fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Returns `true` when `text` is an identifier, raw identifiers such as
/// `r#type` included.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.strip_prefix("r#").unwrap_or(text).chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(is_ident_char)
}

#[cfg(test)]
mod tests;
