//! Introspection of record types declared in Rust source files.
//!
//! Files are parsed with `syn` on first use and cached for the rest of the
//! run. Only top-level structs with named fields can be described.

mod shape;

use std::collections::HashMap;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use fieldmap::{FieldDescriptor, StructDescriptor};
use syn::{Fields, Item};
use tracing::debug;

pub use shape::shape_of;

use crate::config::TypePath;
use crate::error::GenError;
use crate::fs_helpers;

/// Resolves configured type paths into descriptors.
#[derive(Debug)]
pub struct TypeLocator {
    root: Utf8PathBuf,
    files: HashMap<Utf8PathBuf, syn::File>,
}

impl TypeLocator {
    /// Creates a locator resolving files relative to `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: HashMap::new(),
        }
    }

    /// Describes the type at `type_path`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Io`] or [`GenError::Parse`] when the file cannot
    /// be read or parsed, and [`GenError::TypeNotFound`],
    /// [`GenError::NotAStruct`] or [`GenError::TupleStruct`] when the file
    /// has no suitable struct.
    pub fn locate(&mut self, type_path: &TypePath) -> Result<StructDescriptor, GenError> {
        match type_path {
            TypePath::Primitive(name) => Ok(StructDescriptor::primitive(name.as_str())),
            TypePath::Record { file, type_name } => {
                let path = self.root.join(file);
                let parsed = self.parsed(&path)?;
                let descriptor = describe(parsed, type_name, &path, &module_path(file))?;
                debug!(
                    type_name = %descriptor.name,
                    module = %descriptor.qualified_path,
                    fields = descriptor.fields.len(),
                    "record described"
                );
                Ok(descriptor)
            }
        }
    }

    fn parsed(&mut self, path: &Utf8Path) -> Result<&syn::File, GenError> {
        if !self.files.contains_key(path) {
            let contents = fs_helpers::read_to_string(path)?;
            let file = syn::parse_file(&contents).map_err(|source| GenError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path, items = file.items.len(), "source file parsed");
            self.files.insert(path.to_path_buf(), file);
        }
        self.files.get(path).ok_or_else(|| {
            GenError::io(path, std::io::ErrorKind::NotFound.into())
        })
    }
}

fn describe(
    file: &syn::File,
    type_name: &str,
    path: &Utf8Path,
    module: &str,
) -> Result<StructDescriptor, GenError> {
    let mut found_other = false;
    for item in &file.items {
        match item {
            Item::Struct(item_struct) if item_struct.ident == type_name => {
                return struct_descriptor(item_struct, path, module);
            }
            Item::Enum(item_enum) if item_enum.ident == type_name => found_other = true,
            Item::Type(item_type) if item_type.ident == type_name => found_other = true,
            Item::Union(item_union) if item_union.ident == type_name => found_other = true,
            _ => {}
        }
    }
    let type_name = type_name.to_owned();
    let path = path.to_path_buf();
    Err(if found_other {
        GenError::NotAStruct { type_name, path }
    } else {
        GenError::TypeNotFound { type_name, path }
    })
}

fn struct_descriptor(
    item: &syn::ItemStruct,
    path: &Utf8Path,
    module: &str,
) -> Result<StructDescriptor, GenError> {
    let fields = match &item.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| {
                field
                    .ident
                    .as_ref()
                    .map(|ident| FieldDescriptor::new(ident.to_string(), shape_of(&field.ty)))
            })
            .collect(),
        Fields::Unnamed(_) => {
            return Err(GenError::TupleStruct {
                type_name: item.ident.to_string(),
                path: path.to_path_buf(),
            });
        }
        Fields::Unit => Vec::new(),
    };
    Ok(StructDescriptor::new(item.ident.to_string(), module, fields))
}

/// Derives the module path of a source file relative to the crate root.
///
/// A leading `src` directory is dropped, `.rs` is stripped and `mod`, `lib`
/// and `main` stems name their parent module, so `src/models/user.rs` maps
/// to `crate::models::user` and `src/lib.rs` to `crate`.
#[must_use]
pub fn module_path(file: &Utf8Path) -> String {
    let mut segments: Vec<&str> = file
        .components()
        .filter_map(|component| match component {
            Utf8Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    if segments.first() == Some(&"src") {
        segments.remove(0);
    }
    if let Some(last) = segments.pop() {
        let stem = last.strip_suffix(".rs").unwrap_or(last);
        if !matches!(stem, "mod" | "lib" | "main") {
            segments.push(stem);
        }
    }
    std::iter::once("crate")
        .chain(segments)
        .collect::<Vec<_>>()
        .join("::")
}
