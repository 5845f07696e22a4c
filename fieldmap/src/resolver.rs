//! Automatic resolution of destination fields by name.

use tracing::{debug, trace};

use crate::descriptor::{FieldDescriptor, SourceBinding, StructDescriptor};
use crate::matcher::match_field;
use crate::rule::FieldMappingRule;

/// Resolves every destination field against every source.
///
/// Sources are visited in configured order (by `position`). Each source that
/// declares a same-named, convertible field overwrites the rule built so far,
/// so the last such source wins. Rules are returned in destination-field
/// declaration order; fields without a convertible match stay unresolved.
#[must_use]
pub fn resolve(dest: &StructDescriptor, sources: &[SourceBinding]) -> Vec<FieldMappingRule> {
    let mut ordered: Vec<&SourceBinding> = sources.iter().collect();
    ordered.sort_by_key(|binding| binding.position);
    dest.fields
        .iter()
        .map(|field| resolve_field(field, &ordered))
        .collect()
}

fn resolve_field(dest_field: &FieldDescriptor, sources: &[&SourceBinding]) -> FieldMappingRule {
    let mut rule = FieldMappingRule::unmatched(&dest_field.name);
    for binding in sources {
        let Some(source_field) = binding.descriptor.field(&dest_field.name) else {
            continue;
        };
        let source_ref = binding.field_ref(&source_field.name);
        if let Some(conversion) = match_field(&source_ref, source_field, dest_field) {
            trace!(
                field = %dest_field.name,
                source = %binding.alias,
                kind = ?conversion.kind,
                "source field matched"
            );
            rule = FieldMappingRule::automatic(
                &dest_field.name,
                binding,
                &source_field.name,
                source_field.shape.is_pointer(),
                conversion,
            );
        } else {
            debug!(
                field = %dest_field.name,
                source = %binding.alias,
                source_shape = %source_field.shape,
                dest_shape = %dest_field.shape,
                "same-named field is not convertible"
            );
        }
    }
    rule
}
