//! Structural descriptions of record types and their fields.
//!
//! Descriptors are produced once per generation run by an introspector and
//! are read-only afterwards. The synthesizer only cares about the *shape* of
//! a field: whether it is optional, a vector, a map, or a plain named type.

use std::fmt;

use serde::Serialize;

/// Numeric primitive names that may be converted between each other with a
/// cast.
pub const NUMERIC_TYPES: &[&str] = &[
    "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128", "isize", "f32",
    "f64",
];

/// Primitive names accepted as zero-field pseudo record types.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "char", "String", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
    "i64", "i128", "isize", "f32", "f64",
];

/// Returns `true` when `name` is a numeric primitive.
#[must_use]
pub fn is_numeric(name: &str) -> bool {
    NUMERIC_TYPES.contains(&name)
}

/// Returns `true` when `name` is accepted as a primitive pseudo record type.
#[must_use]
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Returns `true` when values of the named scalar are `Copy` primitives.
fn is_copy_primitive(name: &str) -> bool {
    is_numeric(name) || matches!(name, "bool" | "char")
}

/// Recursive structural description of a field type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Shape {
    /// A named, non-generic type such as `i64`, `String` or `crate::Address`.
    Scalar(String),
    /// An optional value (`Option<T>`).
    Pointer(Box<Shape>),
    /// A homogeneous sequence (`Vec<T>`).
    Slice(Box<Shape>),
    /// A key/value container; never converted unless shapes are identical.
    Map(Box<Shape>, Box<Shape>),
    /// A type that cannot be named structurally (tuples, references,
    /// generics). Carries the source text for diagnostics.
    Unsupported(String),
}

impl Shape {
    /// Builds a scalar shape.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar(name.into())
    }

    /// Wraps `inner` in an optional shape.
    #[must_use]
    pub fn pointer(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Wraps `inner` in a sequence shape.
    #[must_use]
    pub fn slice(inner: Self) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Builds a map shape from key and value shapes.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Returns `true` when the outermost layer is optional.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }

    /// Returns the scalar name when this is a bare scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the scalar name for `T` or `Option<T>`.
    #[must_use]
    pub fn base_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(name) => Some(name),
            Self::Pointer(inner) => inner.as_scalar(),
            _ => None,
        }
    }

    /// Returns `true` when the shape is a bare numeric scalar.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_scalar().is_some_and(is_numeric)
    }

    /// Returns `true` when the shape is `Option` of a numeric scalar.
    #[must_use]
    pub fn is_numeric_pointer(&self) -> bool {
        match self {
            Self::Pointer(inner) => inner.is_numeric(),
            _ => false,
        }
    }

    /// Returns `true` when any layer of the shape is unsupported.
    #[must_use]
    pub fn contains_unsupported(&self) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::Pointer(inner) | Self::Slice(inner) => inner.contains_unsupported(),
            Self::Map(key, value) => key.contains_unsupported() || value.contains_unsupported(),
            Self::Unsupported(_) => true,
        }
    }

    /// Returns `true` when values of this shape can be read without cloning.
    #[must_use]
    pub fn is_copy(&self) -> bool {
        match self {
            Self::Scalar(name) => is_copy_primitive(name),
            Self::Pointer(inner) => inner.is_copy(),
            _ => false,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(name) => f.write_str(name),
            Self::Pointer(inner) => write!(f, "Option<{inner}>"),
            Self::Slice(inner) => write!(f, "Vec<{inner}>"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            Self::Unsupported(text) => write!(f, "<unsupported: {text}>"),
        }
    }
}

/// One named field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field identifier, unique within its record.
    pub name: String,
    /// Structural type of the field.
    pub shape: Shape,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// One record type with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    /// Type identifier.
    pub name: String,
    /// Module path the type lives in (for example `crate::models::user`).
    /// Empty for primitive pseudo-types. Only used for display names.
    pub qualified_path: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Creates a record descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        qualified_path: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_path: qualified_path.into(),
            fields,
        }
    }

    /// Creates the zero-field pseudo record used for primitive types.
    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, String::new(), Vec::new())
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns `true` when the record lives in a module that must be
    /// imported before use.
    #[must_use]
    pub fn needs_import(&self) -> bool {
        !self.qualified_path.is_empty() && self.qualified_path != "crate"
    }
}

/// A source record bound to the alias used in generated expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceBinding {
    /// Identifier referencing the source in expressions (`alias.field`).
    pub alias: String,
    /// The source record.
    pub descriptor: StructDescriptor,
    /// Position in the configured source list; later positions win.
    pub position: usize,
}

impl SourceBinding {
    /// Binds `descriptor` to `alias` at `position`.
    #[must_use]
    pub fn new(alias: impl Into<String>, descriptor: StructDescriptor, position: usize) -> Self {
        Self {
            alias: alias.into(),
            descriptor,
            position,
        }
    }

    /// Renders the textual reference to one of this source's fields.
    #[must_use]
    pub fn field_ref(&self, field: &str) -> String {
        format!("{}.{field}", self.alias)
    }
}
