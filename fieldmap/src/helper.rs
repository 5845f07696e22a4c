//! Element-wise vector conversion helpers.
//!
//! A helper converts `Vec<S>` (or `Vec<Option<S>>`) into `Vec<D>` (or
//! `Vec<Option<D>>`) one element at a time. Plans record which helpers their
//! expressions call so the emitter writes each distinct helper exactly once.

use heck::ToSnakeCase;
use serde::Serialize;

/// Identifies one element-wise conversion between two element types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ArrayHelper {
    /// Source element scalar.
    pub source: String,
    /// Whether source elements are optional.
    pub source_optional: bool,
    /// Destination element scalar.
    pub dest: String,
    /// Whether destination elements are optional.
    pub dest_optional: bool,
}

impl ArrayHelper {
    /// Describes a conversion from `source` elements to `dest` elements.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        source_optional: bool,
        dest: impl Into<String>,
        dest_optional: bool,
    ) -> Self {
        Self {
            source: source.into(),
            source_optional,
            dest: dest.into(),
            dest_optional,
        }
    }

    /// Deterministic function name, for example `i32_arr_to_i64_ptr_arr`.
    #[must_use]
    pub fn name(&self) -> String {
        format!(
            "{}{}_arr_to_{}{}_arr",
            ident_fragment(&self.source),
            ptr_suffix(self.source_optional),
            ident_fragment(&self.dest),
            ptr_suffix(self.dest_optional),
        )
    }

    /// Element type accepted by the helper.
    #[must_use]
    pub fn source_element(&self) -> String {
        element_type(&self.source, self.source_optional)
    }

    /// Element type produced by the helper.
    #[must_use]
    pub fn dest_element(&self) -> String {
        element_type(&self.dest, self.dest_optional)
    }

    /// Returns `true` when elements change numeric type.
    #[must_use]
    pub fn is_cast(&self) -> bool {
        self.source != self.dest
    }

    /// Iterator expression over `src` producing the destination vector.
    #[must_use]
    pub fn body(&self) -> String {
        let dest = &self.dest;
        let cast = self.is_cast();
        match (self.source_optional, self.dest_optional) {
            (false, false) if cast => format!("src.iter().map(|value| *value as {dest}).collect()"),
            (false, true) if cast => {
                format!("src.iter().map(|value| Some(*value as {dest})).collect()")
            }
            (false, true) => "src.iter().cloned().map(Some).collect()".to_owned(),
            (true, false) if cast => {
                format!("src.iter().map(|value| value.unwrap_or_default() as {dest}).collect()")
            }
            (true, false) => {
                "src.iter().map(|value| value.clone().unwrap_or_default()).collect()".to_owned()
            }
            (true, true) if cast => {
                format!("src.iter().map(|value| value.map(|inner| inner as {dest})).collect()")
            }
            _ => "src.to_vec()".to_owned(),
        }
    }
}

/// Snake-cases each path segment and joins them with `__`, which a
/// snake-cased segment never contains.
fn ident_fragment(type_name: &str) -> String {
    type_name
        .split("::")
        .map(ToSnakeCase::to_snake_case)
        .collect::<Vec<_>>()
        .join("__")
}

const fn ptr_suffix(optional: bool) -> &'static str {
    if optional { "_ptr" } else { "" }
}

fn element_type(name: &str, optional: bool) -> String {
    if optional {
        format!("Option<{name}>")
    } else {
        name.to_owned()
    }
}
