//! Conversion of `syn` types into structural shapes.
//!
//! Wrapper recognition is shallow and only looks at the final path segment,
//! so `Option<T>`, `std::option::Option<T>` and `core::option::Option<T>` are
//! treated alike.

use fieldmap::Shape;
use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Converts a field type into its shape.
///
/// Anything that is not an `Option`, `Vec`, `HashMap`, `BTreeMap` or a
/// non-generic path becomes [`Shape::Unsupported`] carrying the type text.
#[must_use]
pub fn shape_of(ty: &Type) -> Shape {
    if let Some(inner) = option_inner(ty) {
        return Shape::pointer(shape_of(inner));
    }
    if let Some(inner) = vec_inner(ty) {
        return Shape::slice(shape_of(inner));
    }
    if let Some((key, value)) = map_inner(ty, "HashMap").or_else(|| map_inner(ty, "BTreeMap")) {
        return Shape::map(shape_of(key), shape_of(value));
    }
    match ty {
        Type::Path(type_path) => scalar_name(type_path).map_or_else(|| unsupported(ty), Shape::Scalar),
        Type::Group(group) => shape_of(&group.elem),
        Type::Paren(paren) => shape_of(&paren.elem),
        _ => unsupported(ty),
    }
}

fn unsupported(ty: &Type) -> Shape {
    Shape::Unsupported(ty.to_token_stream().to_string())
}

/// Renders a path without generic arguments, for example `chrono::NaiveDate`.
fn scalar_name(type_path: &TypePath) -> Option<String> {
    if type_path.qself.is_some() {
        return None;
    }
    let path = &type_path.path;
    if path
        .segments
        .iter()
        .any(|segment| !matches!(segment.arguments, PathArguments::None))
    {
        return None;
    }
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    let joined = segments.join("::");
    Some(if path.leading_colon.is_some() {
        format!("::{joined}")
    } else {
        joined
    })
}

/// Extract the single type argument from a `PathArguments` container.
fn single_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    let mut types = angle_args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    });
    let first = types.next()?;
    types.next().is_none().then_some(first)
}

/// Returns the generic parameter if `ty` is the provided wrapper.
fn type_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    single_type_argument(&last.arguments)
}

/// Returns the inner type if `ty` is `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Option")
}

/// Returns the element type if `ty` is `Vec<T>`.
fn vec_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Vec")
}

/// Extracts the key and value types from map-like containers.
fn map_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<(&'a Type, &'a Type)> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    let mut type_args = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    });
    Some((type_args.next()?, type_args.next()?))
}
