//! Structural mapping synthesizer for the `fieldmap` generator.
//!
//! Given a destination record and one or more source records, the crate
//! decides for every destination field whether and how it can be populated,
//! producing a deterministic [`MappingPlan`]. Configuration loading,
//! introspection of Rust sources and rendering of the generated code live in
//! the companion `fieldmap-gen` crate.
//!
//! ```
//! use fieldmap::{FieldDescriptor, MappingPlan, MappingSpec, Shape, StructDescriptor};
//!
//! let dest = StructDescriptor::new(
//!     "UserDto",
//!     "crate::dto",
//!     vec![FieldDescriptor::new("id", Shape::scalar("i64"))],
//! );
//! let source = StructDescriptor::new(
//!     "User",
//!     "crate::models",
//!     vec![FieldDescriptor::new("id", Shape::scalar("i32"))],
//! );
//! let spec = MappingSpec::new("dst", dest).with_source("user", source);
//! let plan = MappingPlan::assemble(&spec)?;
//! assert_eq!(plan.rule("id").and_then(|rule| rule.expression.as_deref()), Some("user.id as i64"));
//! # Ok::<(), fieldmap::FieldmapError>(())
//! ```

pub mod descriptor;
mod error;
pub mod helper;
pub mod matcher;
pub mod plan;
pub mod registry;
pub mod relation;
pub mod resolver;
pub mod rule;

pub use descriptor::{FieldDescriptor, Shape, SourceBinding, StructDescriptor};
pub use error::FieldmapError;
pub use helper::ArrayHelper;
pub use matcher::{Conversion, ConversionKind, match_field};
pub use plan::{MappingPlan, MappingSpec};
pub use registry::AliasRegistry;
pub use relation::{Relation, apply_relations, infer_provenance};
pub use resolver::resolve;
pub use rule::{FieldMappingRule, Provenance, RuleOrigin};
