//! Errors raised while assembling mapping plans.
//!
//! Every variant is fatal: it means the mapping configuration itself is
//! invalid. Fields that simply cannot be mapped are not errors; they are
//! recorded as unresolved rules in the plan.

use thiserror::Error;

/// Errors that abort plan assembly.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldmapError {
    /// A relation string could not be split into target and expression.
    #[error("relation '{relation}' is malformed: {reason}")]
    MalformedRelation {
        /// Raw relation text as configured.
        relation: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A relation targets a field the destination does not declare.
    #[error("relation '{relation}' targets unknown field '{field}' of destination '{destination}'")]
    UnknownRelationTarget {
        /// Raw relation text as configured.
        relation: String,
        /// Field named by the relation.
        field: String,
        /// Destination record name.
        destination: String,
    },

    /// An explicit guard does not name a field of a configured source.
    #[error("guard '{guard}' of relation '{relation}' does not name a source field")]
    UnknownGuard {
        /// Raw relation text as configured.
        relation: String,
        /// Guard reference as configured.
        guard: String,
    },

    /// A mapper was configured without any source.
    #[error("mapper for destination '{destination}' declares no sources")]
    MissingSources {
        /// Destination record name.
        destination: String,
    },

    /// An alias is not usable as an identifier.
    #[error("alias '{alias}' for '{type_name}' is not a valid identifier")]
    InvalidAlias {
        /// Alias as configured.
        alias: String,
        /// Record the alias is bound to.
        type_name: String,
    },

    /// Two bindings of one mapper share an alias.
    #[error("alias '{alias}' is bound more than once in mapper for '{destination}'")]
    DuplicateAlias {
        /// Repeated alias.
        alias: String,
        /// Destination record name.
        destination: String,
    },
}

impl FieldmapError {
    pub(crate) fn malformed(relation: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRelation {
            relation: relation.to_owned(),
            reason: reason.into(),
        }
    }
}
