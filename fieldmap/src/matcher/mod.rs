//! Compatibility matcher for a single destination/source field pair.
//!
//! The matcher is a pure decision table. Rules are tried in precedence order
//! and the first applicable one wins:
//!
//! 1. identical shapes pass through;
//! 2. `Option<S>` into `S` reads the present value;
//! 3. `S` into `Option<S>` wraps the value in `Some`;
//! 4. numeric into numeric casts;
//! 5. `Option<numeric>` into numeric reads then casts;
//! 6. numeric into `Option<numeric>` casts then wraps;
//! 7. `Option<numeric>` into `Option<numeric>` casts inside the option;
//! 8. vectors of compatible elements call an element-wise helper;
//! 9. everything else is not convertible.

use serde::Serialize;

use crate::descriptor::{FieldDescriptor, Shape, is_numeric};
use crate::helper::ArrayHelper;

/// The kind of conversion selected for a field pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// The value is copied or cloned unchanged.
    PassThrough,
    /// The present value of an optional source is read.
    Dereference,
    /// The source value is wrapped in `Some`.
    Wrap,
    /// A numeric `as` cast.
    Cast,
    /// Read the present value, then cast.
    DereferenceCast,
    /// Cast, then wrap in `Some`.
    CastWrap,
    /// Cast inside an option.
    PointerCast,
    /// Element-wise vector conversion through a generated helper.
    Elementwise(ArrayHelper),
}

/// A possible conversion and the expression implementing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Selected decision-table rule.
    pub kind: ConversionKind,
    /// Right-hand side of the generated assignment.
    pub expression: String,
}

impl Conversion {
    fn new(kind: ConversionKind, expression: String) -> Self {
        Self { kind, expression }
    }

    /// Helper function the expression calls, if any.
    #[must_use]
    pub const fn helper(&self) -> Option<&ArrayHelper> {
        match &self.kind {
            ConversionKind::Elementwise(helper) => Some(helper),
            _ => None,
        }
    }
}

/// Decides whether `source` can populate `dest`.
///
/// `source_ref` is the textual reference to the source value, usually
/// `alias.field`. Returns `None` when no conversion is safe without developer
/// judgement; such fields are left for manual relations.
#[must_use]
pub fn match_field(
    source_ref: &str,
    source: &FieldDescriptor,
    dest: &FieldDescriptor,
) -> Option<Conversion> {
    match_shapes(source_ref, &source.shape, &dest.shape)
}

/// Shape-level form of [`match_field`].
#[must_use]
pub fn match_shapes(source_ref: &str, source: &Shape, dest: &Shape) -> Option<Conversion> {
    if source.contains_unsupported() || dest.contains_unsupported() {
        return None;
    }
    if source == dest {
        return Some(Conversion::new(
            ConversionKind::PassThrough,
            read(source_ref, source),
        ));
    }
    pointer_conversion(source_ref, source, dest)
        .or_else(|| numeric_conversion(source_ref, source, dest))
        .or_else(|| slice_conversion(source_ref, source, dest))
}

/// Rules 2 and 3: optional and plain forms of the same shape.
fn pointer_conversion(source_ref: &str, source: &Shape, dest: &Shape) -> Option<Conversion> {
    if let Shape::Pointer(inner) = source
        && inner.as_ref() == dest
    {
        let expression = format!("{}.unwrap_or_default()", read(source_ref, source));
        return Some(Conversion::new(ConversionKind::Dereference, expression));
    }
    if let Shape::Pointer(inner) = dest
        && inner.as_ref() == source
    {
        let expression = format!("Some({})", read(source_ref, source));
        return Some(Conversion::new(ConversionKind::Wrap, expression));
    }
    None
}

/// Rules 4 to 7: casts between numeric scalars, optional or not.
fn numeric_conversion(source_ref: &str, source: &Shape, dest: &Shape) -> Option<Conversion> {
    let dest_type = dest.base_scalar().filter(|name| is_numeric(name))?;
    let (kind, expression) = match (source.is_pointer(), dest.is_pointer()) {
        (false, false) if source.is_numeric() => (
            ConversionKind::Cast,
            format!("{source_ref} as {dest_type}"),
        ),
        (true, false) if source.is_numeric_pointer() => (
            ConversionKind::DereferenceCast,
            format!("{source_ref}.unwrap_or_default() as {dest_type}"),
        ),
        (false, true) if source.is_numeric() => (
            ConversionKind::CastWrap,
            format!("Some({source_ref} as {dest_type})"),
        ),
        (true, true) if source.is_numeric_pointer() => (
            ConversionKind::PointerCast,
            format!("{source_ref}.map(|value| value as {dest_type})"),
        ),
        _ => return None,
    };
    Some(Conversion::new(kind, expression))
}

/// Rule 8: one level of vector nesting with scalar or optional-scalar
/// elements.
fn slice_conversion(source_ref: &str, source: &Shape, dest: &Shape) -> Option<Conversion> {
    let (Shape::Slice(source_elem), Shape::Slice(dest_elem)) = (source, dest) else {
        return None;
    };
    let (source_type, source_optional) = element_parts(source_elem)?;
    let (dest_type, dest_optional) = element_parts(dest_elem)?;
    let same_family = source_type == dest_type || (is_numeric(source_type) && is_numeric(dest_type));
    if !same_family {
        return None;
    }
    let helper = ArrayHelper::new(source_type, source_optional, dest_type, dest_optional);
    let expression = format!("{}(&{source_ref})", helper.name());
    Some(Conversion::new(ConversionKind::Elementwise(helper), expression))
}

fn element_parts(shape: &Shape) -> Option<(&str, bool)> {
    match shape {
        Shape::Scalar(name) => Some((name, false)),
        Shape::Pointer(inner) => inner.as_scalar().map(|name| (name, true)),
        _ => None,
    }
}

/// Reads a value by copy or by clone, depending on the shape.
fn read(source_ref: &str, shape: &Shape) -> String {
    if shape.is_copy() {
        source_ref.to_owned()
    } else {
        format!("{source_ref}.clone()")
    }
}

#[cfg(test)]
mod tests;
