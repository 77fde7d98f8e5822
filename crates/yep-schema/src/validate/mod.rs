//! Declaration checks that run before any model is linked or composed.

pub mod naming;

use crate::{
    err,
    error::ErrorTree,
    node::ModelDecl,
    registry::Declarations,
    types::RelationKind,
};
use naming::{validate_field_name, validate_member_name, validate_model_name};
use std::collections::BTreeSet;

/// Validate every declaration in isolation and collect all problems.
pub(crate) fn validate_declarations(decls: &Declarations, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();
    for decl in &decls.models {
        if !seen.insert(decl.name.as_str()) {
            err!(errs, "model '{}' is declared more than once", decl.name);
        }

        validate_model(decl, errs.route(&decl.name));
    }

    let mut methods = BTreeSet::new();
    for method in &decls.framework_methods {
        errs.add_result(validate_member_name(&method.name));

        if !methods.insert(method.name.as_str()) {
            err!(errs, "framework method '{}' is declared more than once", method.name);
        }
    }
}

fn validate_model(decl: &ModelDecl, errs: &mut ErrorTree) {
    errs.add_result(validate_model_name(&decl.name));

    let mut fields = BTreeSet::new();
    for field in &decl.fields {
        errs.add_result(validate_field_name(&field.name));

        if !fields.insert(field.name.as_str()) {
            err!(errs, "field '{}' is declared more than once", field.name);
        }

        if let Some(relation) = &field.relation
            && relation.kind == RelationKind::One2Many
            && relation.reverse.is_none()
        {
            err!(errs, "one2many field '{}' has no reverse field", field.name);
        }
    }

    let mut methods = BTreeSet::new();
    for method in &decl.methods {
        errs.add_result(validate_member_name(&method.name));

        if !methods.insert(method.name.as_str()) {
            err!(errs, "method '{}' is declared more than once", method.name);
        }
        if method.signature.variadic && method.signature.params.is_empty() {
            err!(errs, "variadic method '{}' has no parameters", method.name);
        }
        if fields.contains(method.name.as_str()) {
            err!(errs, "'{}' is declared as both a field and a method", method.name);
        }
    }

    if decl.is_mixin() && !decl.embeds.is_empty() {
        err!(errs, "mixin '{}' cannot embed other models", decl.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        node::{FieldDecl, MethodDecl},
        types::TypeRef,
    };

    fn check(decls: &Declarations) -> ErrorTree {
        let mut errs = ErrorTree::new();
        validate_declarations(decls, &mut errs);

        errs
    }

    #[test]
    fn duplicate_models_and_members_are_reported() {
        let decls = Declarations::new()
            .declare(
                ModelDecl::new("User")
                    .field(FieldDecl::new("Name", TypeRef::text()))
                    .field(FieldDecl::new("Name", TypeRef::text()))
                    .method(MethodDecl::new("Name")),
            )
            .declare(ModelDecl::new("User"));

        let errs = check(&decls);

        assert!(errs.contains("model 'User' is declared more than once"));
        assert!(errs.contains("field 'Name' is declared more than once"));
        assert!(errs.contains("'Name' is declared as both a field and a method"));
    }

    #[test]
    fn one2many_requires_reverse() {
        let mut field = FieldDecl::one2many("Posts", "Post", "User");
        if let Some(relation) = field.relation.as_mut() {
            relation.reverse = None;
        }

        let decls = Declarations::new().declare(ModelDecl::new("User").field(field));

        assert!(check(&decls).contains("has no reverse field"));
    }

    #[test]
    fn mixins_cannot_embed() {
        let decls = Declarations::new().declare(ModelDecl::new_mixin("Base").embed("Profile"));

        assert!(check(&decls).contains("cannot embed"));
    }

    #[test]
    fn clean_declarations_pass() {
        let decls = Declarations::new()
            .declare(ModelDecl::new("Tag").field(FieldDecl::new("Name", TypeRef::text())))
            .framework_method(MethodDecl::new("NameGet"));

        assert!(check(&decls).is_empty());
    }
}
