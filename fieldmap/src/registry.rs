//! Import alias bookkeeping for generated code.
//!
//! Every module path referenced by a generated file gets one alias, unique
//! within the run. The registry is an explicit value threaded through the
//! pipeline so independent runs never share aliases.

use std::collections::BTreeMap;

use crate::descriptor::StructDescriptor;

/// Assigns unique import aliases to module paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasRegistry {
    paths_by_alias: BTreeMap<String, String>,
}

impl AliasRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paths_by_alias: BTreeMap::new(),
        }
    }

    /// Returns the alias for `module_path`, registering it if needed.
    ///
    /// The preferred alias is the last path segment. When that alias already
    /// belongs to a different path, numeric suffixes starting at `1` are
    /// tried until a free or matching alias is found.
    pub fn register(&mut self, module_path: &str) -> String {
        let preferred = module_path.rsplit("::").next().unwrap_or(module_path);
        let mut candidate = preferred.to_owned();
        let mut suffix = 1_u32;
        loop {
            match self.paths_by_alias.get(&candidate) {
                None => {
                    self.paths_by_alias
                        .insert(candidate.clone(), module_path.to_owned());
                    return candidate;
                }
                Some(existing) if existing == module_path => return candidate,
                Some(_) => {
                    candidate = format!("{preferred}{suffix}");
                    suffix += 1;
                }
            }
        }
    }

    /// Binds `alias` to `path` verbatim.
    ///
    /// Returns `false` when the alias already belongs to another path.
    pub fn reserve(&mut self, alias: &str, path: &str) -> bool {
        match self.paths_by_alias.get(alias) {
            Some(existing) => existing == path,
            None => {
                self.paths_by_alias
                    .insert(alias.to_owned(), path.to_owned());
                true
            }
        }
    }

    /// Returns the name generated code uses for `descriptor`, registering
    /// its module when it needs an import.
    pub fn qualified_name(&mut self, descriptor: &StructDescriptor) -> String {
        if descriptor.qualified_path == "crate" {
            return format!("crate::{}", descriptor.name);
        }
        if !descriptor.needs_import() {
            return descriptor.name.clone();
        }
        let alias = self.register(&descriptor.qualified_path);
        format!("{alias}::{}", descriptor.name)
    }

    /// Registered `(alias, path)` pairs sorted by alias.
    pub fn imports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths_by_alias
            .iter()
            .map(|(alias, path)| (alias.as_str(), path.as_str()))
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths_by_alias.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_default_to_the_last_segment() {
        let mut registry = AliasRegistry::new();
        assert_eq!(registry.register("crate::models::user"), "user");
        assert_eq!(registry.register("crate::models::user"), "user");
    }

    #[test]
    fn colliding_aliases_receive_suffixes() {
        let mut registry = AliasRegistry::new();
        assert_eq!(registry.register("crate::v1::user"), "user");
        assert_eq!(registry.register("crate::v2::user"), "user1");
        assert_eq!(registry.register("crate::v3::user"), "user2");
        assert_eq!(registry.register("crate::v2::user"), "user1");
        let imports: Vec<_> = registry.imports().collect();
        assert_eq!(
            imports,
            [
                ("user", "crate::v1::user"),
                ("user1", "crate::v2::user"),
                ("user2", "crate::v3::user"),
            ]
        );
    }

    #[test]
    fn separate_registries_do_not_share_aliases() {
        let mut first = AliasRegistry::new();
        let mut second = AliasRegistry::new();
        first.register("crate::a::user");
        assert_eq!(second.register("crate::b::user"), "user");
    }

    #[test]
    fn reserved_aliases_block_registration() {
        let mut registry = AliasRegistry::new();
        assert!(registry.reserve("user", "external::user"));
        assert!(!registry.reserve("user", "other::user"));
        assert_eq!(registry.register("crate::models::user"), "user1");
    }

    #[test]
    fn qualified_names_depend_on_the_module() {
        let mut registry = AliasRegistry::new();
        let primitive = StructDescriptor::primitive("u32");
        let root = StructDescriptor::new("Config", "crate", Vec::new());
        let nested = StructDescriptor::new("User", "crate::models::user", Vec::new());
        assert_eq!(registry.qualified_name(&primitive), "u32");
        assert_eq!(registry.qualified_name(&root), "crate::Config");
        assert_eq!(registry.qualified_name(&nested), "user::User");
        assert!(!registry.is_empty());
    }
}
