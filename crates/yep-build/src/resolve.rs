use crate::config::last_segment;
use std::collections::{BTreeMap, BTreeSet};
use yep_schema::types::TypeRef;

///
/// ResolvedType
/// the printable wrapper type of a field, parameter or return value
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedType {
    pub name: String,
    pub is_record_set: bool,
}

/// Resolve `ty` as seen from the generated file of `model`.
///
/// Record sets become `<Model>Set`. Types living in the pool module are
/// printed bare, other named types through their last path segment.
#[must_use]
pub fn resolve_type(model: &str, ty: &TypeRef, pool_path: &str) -> ResolvedType {
    match ty {
        TypeRef::RecordSet { model: target } => ResolvedType {
            name: format!("{}Set", target.as_deref().unwrap_or(model)),
            is_record_set: true,
        },
        _ => ResolvedType {
            name: type_name(model, ty, pool_path),
            is_record_set: false,
        },
    }
}

fn type_name(model: &str, ty: &TypeRef, pool_path: &str) -> String {
    match ty {
        TypeRef::Primitive(p) => p.rust_type().to_string(),
        TypeRef::Named { path, ident } => {
            if path.is_empty() || path == pool_path {
                ident.clone()
            } else {
                format!("{}::{ident}", last_segment(path))
            }
        }
        TypeRef::Boxed(inner) => format!("Box<{}>", type_name(model, inner, pool_path)),
        TypeRef::Option(inner) => format!("Option<{}>", type_name(model, inner, pool_path)),
        TypeRef::Vec(inner) => format!("Vec<{}>", type_name(model, inner, pool_path)),
        TypeRef::RecordSet { .. } => resolve_type(model, ty, pool_path).name,
    }
}

///
/// Dependencies
/// module paths a generated file imports, in first-insertion order
///

#[derive(Clone, Debug)]
pub struct Dependencies {
    paths: Vec<String>,
    seen: BTreeSet<String>,
}

impl Dependencies {
    /// Start with the runtime module. The pool module is never listed, its
    /// items reach every generated file through `use super::*`.
    #[must_use]
    pub fn new(runtime_path: &str, pool_path: &str) -> Self {
        let mut deps = Self {
            paths: Vec::new(),
            seen: BTreeSet::from([pool_path.to_string()]),
        };
        deps.add_path(runtime_path);

        deps
    }

    /// Record the module `ty` is declared in, looking through every wrapper layer.
    pub fn add(&mut self, ty: &TypeRef) {
        if let TypeRef::Named { path, .. } = ty.base() {
            self.add_path(path);
        }
    }

    pub fn add_path(&mut self, path: &str) {
        if !path.is_empty() && self.seen.insert(path.to_string()) {
            self.paths.push(path.to_string());
        }
    }

    /// First two paths that would be imported under the same name.
    #[must_use]
    pub fn collision(&self) -> Option<(&str, &str)> {
        let mut names: BTreeMap<&str, &str> = BTreeMap::new();

        self.paths.iter().find_map(|path| {
            names
                .insert(last_segment(path), path.as_str())
                .map(|first| (first, path.as_str()))
        })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yep_schema::types::Primitive;

    const POOL: &str = "crate::pool";

    #[test]
    fn record_sets_resolve_to_set_wrappers() {
        assert_eq!(
            resolve_type("User", &TypeRef::record_set(), POOL),
            ResolvedType {
                name: "UserSet".into(),
                is_record_set: true
            }
        );
        assert_eq!(
            resolve_type("User", &TypeRef::record_set_of("Profile"), POOL).name,
            "ProfileSet"
        );
    }

    #[test]
    fn pool_types_are_not_qualified() {
        let ty = TypeRef::option(TypeRef::named(POOL, "Address"));

        assert_eq!(resolve_type("User", &ty, POOL).name, "Option<Address>");
    }

    #[test]
    fn foreign_types_use_their_module_name() {
        let ty = TypeRef::vec(TypeRef::named("chrono::naive", "NaiveDate"));
        let resolved = resolve_type("User", &ty, POOL);

        assert_eq!(resolved.name, "Vec<naive::NaiveDate>");
        assert!(!resolved.is_record_set);
    }

    #[test]
    fn wrapped_record_sets_keep_the_wrapper() {
        let ty = TypeRef::vec(TypeRef::record_set_of("Tag"));

        assert_eq!(resolve_type("User", &ty, POOL).name, "Vec<TagSet>");
    }

    #[test]
    fn modules_sharing_a_name_collide() {
        let mut deps = Dependencies::new("yep::models", POOL);
        deps.add(&TypeRef::named("chrono::naive", "NaiveDate"));
        deps.add(&TypeRef::named("billing::types", "Invoice"));
        assert_eq!(deps.collision(), None);

        deps.add(&TypeRef::named("shipping::types", "Parcel"));
        assert_eq!(deps.collision(), Some(("billing::types", "shipping::types")));

        let mut deps = Dependencies::new("yep::models", POOL);
        deps.add(&TypeRef::named("app::models", "Money"));
        assert_eq!(deps.collision(), Some(("yep::models", "app::models")));
    }

    #[test]
    fn dependencies_are_ordered_and_unique() {
        let mut deps = Dependencies::new("yep::models", POOL);
        deps.add(&TypeRef::named("chrono", "NaiveDate"));
        deps.add(&TypeRef::Primitive(Primitive::Text));
        deps.add(&TypeRef::record_set_of("Tag"));
        deps.add(&TypeRef::boxed(TypeRef::named("std::collections", "BTreeMap")));
        deps.add(&TypeRef::option(TypeRef::named("chrono", "NaiveDateTime")));
        deps.add(&TypeRef::named(POOL, "Address"));

        assert_eq!(
            deps.into_vec(),
            vec!["yep::models", "chrono", "std::collections"]
        );
    }
}
