use crate::{
    ID_FIELD, err,
    error::ErrorTree,
    node::{FieldDecl, MethodDecl, ModelDecl, Relation},
    registry::{Declarations, Member, Origin, ResolvedField, ResolvedMethod, ResolvedModel},
    types::{RelationKind, TypeRef},
};
use std::collections::{BTreeMap, BTreeSet};

///
/// MemberList
/// insertion ordered, replacing an entry keeps its original position
///

#[derive(Debug)]
struct MemberList<T: Member> {
    entries: Vec<T>,
}

impl<T: Member> MemberList<T> {
    const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.name() == name)
    }

    fn upsert(&mut self, member: T) {
        match self.entries.iter_mut().find(|e| e.name() == member.name()) {
            Some(slot) => *slot = member,
            None => self.entries.push(member),
        }
    }

    // embedded members never replace an existing one; two embeddings may not
    // contribute the same name
    fn insert_embedded(&mut self, member: T, kind: &str, model: &str, errs: &mut ErrorTree) {
        match self.get(member.name()) {
            Some(existing) => {
                if let Origin::Embedded { model: other, .. } = existing.origin()
                    && other != model
                {
                    err!(
                        errs,
                        "{kind} '{}' is embedded from both '{other}' and '{model}'",
                        member.name()
                    );
                }
            }
            None => self.entries.push(member),
        }
    }
}

///
/// Composer
/// folds mixins then embeddings into each model, dependencies first
///

pub(crate) struct Composer<'a> {
    decls: BTreeMap<&'a str, &'a ModelDecl>,
    common_mixins: &'a [String],
    framework_methods: &'a [MethodDecl],
    done: BTreeMap<String, ResolvedModel>,
    failed: BTreeSet<String>,
    stack: Vec<String>,
}

impl<'a> Composer<'a> {
    pub(crate) fn new(decls: &'a Declarations) -> Self {
        Self {
            decls: decls.models.iter().map(|m| (m.name.as_str(), m)).collect(),
            common_mixins: &decls.common_mixins,
            framework_methods: &decls.framework_methods,
            done: BTreeMap::new(),
            failed: BTreeSet::new(),
            stack: Vec::new(),
        }
    }

    pub(crate) fn compose_all(mut self, errs: &mut ErrorTree) -> BTreeMap<String, ResolvedModel> {
        let names: Vec<&str> = self.decls.keys().copied().collect();
        for name in names {
            self.compose(name, errs);
        }

        self.done
    }

    fn compose(&mut self, name: &str, errs: &mut ErrorTree) -> Option<ResolvedModel> {
        if let Some(model) = self.done.get(name) {
            return Some(model.clone());
        }
        if self.failed.contains(name) {
            return None;
        }

        if let Some(pos) = self.stack.iter().position(|n| n == name) {
            let cycle = self.stack[pos..].join(" -> ");
            err!(
                errs.route(name),
                "composition cycle detected: {cycle} -> {name}"
            );

            return None;
        }

        let decl = *self.decls.get(name)?;
        self.stack.push(name.to_string());
        let model = self.compose_decl(decl, errs);
        self.stack.pop();

        let Some(model) = model else {
            self.failed.insert(name.to_string());
            return None;
        };
        self.done.insert(model.name.clone(), model.clone());

        Some(model)
    }

    fn compose_decl(&mut self, decl: &ModelDecl, errs: &mut ErrorTree) -> Option<ResolvedModel> {
        let mut fields = MemberList::new();
        let mut methods = MemberList::new();
        let mut applied: Vec<String> = Vec::new();
        let mut complete = true;

        // framework layer
        if !decl.is_mixin() {
            fields.upsert(id_field());

            for method in self.framework_methods {
                methods.upsert(resolve_method(method, "", Origin::Framework));
            }
        }

        // mixin layers, last applied wins
        let common: &[String] = if decl.is_mixin() {
            &[]
        } else {
            self.common_mixins
        };
        for mixin in common.iter().chain(&decl.mixins) {
            let Some(source) = self.compose(mixin, errs) else {
                complete = false;
                continue;
            };

            for name in source.mixins.iter().chain([mixin]) {
                applied.retain(|n| n != name);
                applied.push(name.clone());
            }

            let origin = Origin::Mixin {
                mixin: mixin.clone(),
            };
            for field in source.fields {
                fields.upsert(field.with_origin(origin.clone()));
            }
            for method in source.methods {
                methods.upsert(method.with_origin(origin.clone()));
            }
        }

        // own declarations override every mixin
        for field in &decl.fields {
            fields.upsert(resolve_field(field, &decl.name, Origin::Own));
        }
        for method in &decl.methods {
            let mut resolved = resolve_method(method, &decl.name, Origin::Own);
            if resolved.doc.is_empty()
                && let Some(prev) = methods.get(&method.name)
            {
                resolved.doc.clone_from(&prev.doc);
            }
            methods.upsert(resolved);
        }

        // embeddings
        for embed in &decl.embeds {
            let Some(source) = self.compose(embed, errs) else {
                complete = false;
                continue;
            };

            match fields.get(embed) {
                None => fields.upsert(link_field(embed, &decl.name)),
                Some(link) => {
                    let valid = link
                        .relation
                        .as_ref()
                        .is_some_and(|r| r.kind.is_single() && r.target == *embed);
                    if !valid {
                        err!(
                            errs.route(&decl.name),
                            "field '{embed}' must be a many2one to the embedded model '{embed}'"
                        );
                    }
                }
            }

            let origin = Origin::Embedded {
                model: embed.clone(),
                via: embed.clone(),
            };
            for mut field in source.fields {
                if field.origin.is_framework() || field.name == *embed {
                    continue;
                }
                field.ty = field.ty.with_model(embed);
                fields.insert_embedded(
                    field.with_origin(origin.clone()),
                    "field",
                    embed,
                    errs.route(&decl.name),
                );
            }
            for mut method in source.methods {
                if method.origin.is_framework() {
                    continue;
                }
                bind_signature(&mut method, embed);
                methods.insert_embedded(
                    method.with_origin(origin.clone()),
                    "method",
                    embed,
                    errs.route(&decl.name),
                );
            }
        }

        for field in &fields.entries {
            if methods.get(&field.name).is_some() {
                err!(
                    errs.route(&decl.name),
                    "'{}' is composed as both a field and a method",
                    field.name
                );
            }
        }

        if !complete {
            return None;
        }

        let mut methods = methods.entries;
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        Some(ResolvedModel {
            name: decl.name.clone(),
            kind: decl.kind,
            doc: decl.doc.clone(),
            fields: fields.entries,
            methods,
            mixins: applied,
            embeds: decl.embeds.clone(),
        })
    }
}

fn id_field() -> ResolvedField {
    ResolvedField {
        name: ID_FIELD.to_string(),
        ty: TypeRef::int64(),
        relation: None,
        readonly: true,
        doc: None,
        origin: Origin::Framework,
        declared_by: String::new(),
    }
}

fn link_field(embed: &str, model: &str) -> ResolvedField {
    ResolvedField {
        name: embed.to_string(),
        ty: TypeRef::record_set_of(embed),
        relation: Some(Relation {
            kind: RelationKind::Many2One,
            target: embed.to_string(),
            reverse: None,
        }),
        readonly: false,
        doc: None,
        origin: Origin::Own,
        declared_by: model.to_string(),
    }
}

fn resolve_field(field: &FieldDecl, model: &str, origin: Origin) -> ResolvedField {
    ResolvedField {
        name: field.name.clone(),
        ty: field.ty.clone(),
        relation: field.relation.clone(),
        readonly: field.readonly,
        doc: field.doc.clone(),
        origin,
        declared_by: model.to_string(),
    }
}

// self-referencing record sets stay open until the member lands on a model
fn resolve_method(method: &MethodDecl, model: &str, origin: Origin) -> ResolvedMethod {
    ResolvedMethod {
        name: method.name.clone(),
        doc: method.doc.clone(),
        signature: method.signature.clone(),
        origin,
        declared_by: model.to_string(),
    }
}

// embedded members keep referring to the embedded model
fn bind_signature(method: &mut ResolvedMethod, model: &str) {
    let sig = &mut method.signature;
    for ty in sig.params.iter_mut().chain(&mut sig.returns) {
        *ty = ty.with_model(model);
    }
}
