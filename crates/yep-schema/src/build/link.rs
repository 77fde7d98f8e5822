use crate::{
    err,
    error::ErrorTree,
    node::{ModelDecl, ModelKind},
    registry::{Declarations, ResolvedModel},
    types::TypeRef,
};
use std::collections::BTreeMap;

// link_models
// every name a declaration refers to must exist and be of the right kind
pub(crate) fn link_models(decls: &Declarations, errs: &mut ErrorTree) {
    let kinds: BTreeMap<&str, ModelKind> = decls
        .models
        .iter()
        .map(|m| (m.name.as_str(), m.kind))
        .collect();

    for name in &decls.common_mixins {
        expect_kind(&kinds, name, ModelKind::Mixin, "common mixin", errs);
    }

    for method in &decls.framework_methods {
        let sig = &method.signature;
        for ty in sig.params.iter().chain(&sig.returns) {
            link_type(&kinds, ty, errs.route(&method.name));
        }
    }

    for decl in &decls.models {
        link_model(&kinds, decl, errs.route(&decl.name));
    }
}

fn link_model(kinds: &BTreeMap<&str, ModelKind>, decl: &ModelDecl, errs: &mut ErrorTree) {
    for field in &decl.fields {
        match &field.relation {
            Some(relation) => expect_kind(
                kinds,
                &relation.target,
                ModelKind::Model,
                &format!("relation target of '{}'", field.name),
                errs,
            ),
            None => link_type(kinds, &field.ty, errs),
        }
    }

    for method in &decl.methods {
        let sig = &method.signature;
        for ty in sig.params.iter().chain(&sig.returns) {
            link_type(kinds, ty, errs);
        }
    }

    for mixin in &decl.mixins {
        expect_kind(kinds, mixin, ModelKind::Mixin, "mixin", errs);
    }

    for embed in &decl.embeds {
        expect_kind(kinds, embed, ModelKind::Model, "embedded model", errs);
    }
}

fn link_type(kinds: &BTreeMap<&str, ModelKind>, ty: &TypeRef, errs: &mut ErrorTree) {
    if let TypeRef::RecordSet { model: Some(model) } = ty.base() {
        expect_kind(kinds, model, ModelKind::Model, "record set", errs);
    }
}

fn expect_kind(
    kinds: &BTreeMap<&str, ModelKind>,
    name: &str,
    expected: ModelKind,
    what: &str,
    errs: &mut ErrorTree,
) {
    match kinds.get(name) {
        None => err!(errs, "{what} '{name}' is not a declared model"),
        Some(kind) if *kind != expected => {
            err!(errs, "{what} '{name}' must be a {expected:?}, found a {kind:?}");
        }
        Some(_) => {}
    }
}

// link_reverse_fields
// one2many fields need a single-relation field on the target pointing back
pub(crate) fn link_reverse_fields(models: &BTreeMap<String, ResolvedModel>, errs: &mut ErrorTree) {
    for model in models.values().filter(|m| !m.is_mixin()) {
        for field in &model.fields {
            let Some(relation) = &field.relation else {
                continue;
            };
            let Some(reverse) = &relation.reverse else {
                continue;
            };
            let Some(target) = models.get(&relation.target) else {
                continue;
            };

            let points_back = target
                .field(reverse)
                .and_then(|f| f.relation.as_ref())
                .is_some_and(|r| r.kind.is_single() && r.target == model.name);

            if !points_back {
                err!(
                    errs.route(&model.name),
                    "reverse field '{}.{reverse}' of '{}' must be a many2one or one2one to '{}'",
                    relation.target,
                    field.name,
                    model.name
                );
            }
        }
    }
}
