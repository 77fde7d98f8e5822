use crate::{
    GenerateError,
    config::GenerateConfig,
    resolve::{Dependencies, ResolvedType, resolve_type},
    signature::{MethodAstMap, align, lookup},
};
use yep_schema::{
    registry::{ModelRegistry, ResolvedField, ResolvedMethod, ResolvedModel},
    types::TypeRef,
};

/// Methods the pool emits with dedicated typed signatures.
pub const EXCLUDED_METHODS: [&str; 3] = ["Create", "First", "All"];

// inherent methods of every generated set
const WRAPPER_METHODS: [&str; 10] = [
    "new", "create", "write", "first", "all", "records", "search", "filter", "load", "union",
];

///
/// GenerationUnit
/// everything the template needs for one model, already resolved
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationUnit {
    pub name: String,
    pub file_name: String,
    pub deps: Vec<String>,
    pub fields: Vec<FieldUnit>,
    pub methods: Vec<MethodUnit>,
    /// `create` runs the model's own `Create` method instead of a plain insert.
    pub dispatch_create: bool,
}

///
/// FieldUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldUnit {
    pub name: String,
    pub ty: String,
    pub is_record_set: bool,
    pub readonly: bool,
}

///
/// MethodUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodUnit {
    pub name: String,
    pub doc: String,
    pub params: Vec<ParamUnit>,
    pub returns: Option<ReturnUnit>,
}

///
/// ParamUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamUnit {
    pub name: String,
    pub ty: String,
    pub is_record_set: bool,
}

///
/// ReturnUnit
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReturnUnit {
    pub ty: String,
    pub is_record_set: bool,
}

impl GenerationUnit {
    /// Resolve every field and method of `model`; fails on the first bad member.
    pub fn assemble(
        registry: &ModelRegistry,
        model: &ResolvedModel,
        ast: &MethodAstMap,
        config: &GenerateConfig,
    ) -> Result<Self, GenerateError> {
        let mut deps = Dependencies::new(&config.runtime_path, &config.pool_path);

        let fields = model
            .fields
            .iter()
            .map(|field| {
                deps.add(&field.ty);
                field_unit(&model.name, field, config)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for field in fields.iter().filter(|f| !f.readonly) {
            let setter = format!("Set{}", field.name);
            if model.method(&setter).is_some() || model.field(&setter).is_some() {
                return Err(GenerateError::ReservedName {
                    model: model.name.clone(),
                    member: setter,
                });
            }
        }

        let mut dispatch_create = false;
        let mut methods = Vec::new();
        for method in &model.methods {
            if EXCLUDED_METHODS.contains(&method.name.as_str()) {
                check_override(model, method)?;
                dispatch_create = true;
                continue;
            }
            check_name(&model.name, &method.name)?;

            let aligned = align(
                &model.name,
                method,
                lookup(ast, registry, model, method),
            )?;

            let sig = &method.signature;
            let last = sig.params.len().saturating_sub(1);
            let mut params = Vec::with_capacity(sig.params.len());
            for (i, (name, ty)) in aligned.params.into_iter().zip(&sig.params).enumerate() {
                deps.add(ty);

                let resolved = resolve_type(&model.name, ty, &config.pool_path);
                let resolved = if sig.variadic && i == last {
                    ResolvedType {
                        name: format!("Vec<{}>", resolved.name),
                        is_record_set: false,
                    }
                } else {
                    resolved
                };
                check_type(&model.name, &method.name, &resolved.name)?;

                params.push(ParamUnit {
                    name,
                    ty: resolved.name,
                    is_record_set: resolved.is_record_set,
                });
            }

            let returns = match &sig.returns {
                Some(ty) => {
                    deps.add(ty);
                    let resolved = resolve_type(&model.name, ty, &config.pool_path);
                    check_type(&model.name, &method.name, &resolved.name)?;

                    Some(ReturnUnit {
                        ty: resolved.name,
                        is_record_set: resolved.is_record_set,
                    })
                }
                None => None,
            };

            methods.push(MethodUnit {
                name: method.name.clone(),
                doc: aligned.doc,
                params,
                returns,
            });
        }

        if let Some((first, second)) = deps.collision() {
            return Err(GenerateError::ImportCollision {
                model: model.name.clone(),
                first: first.to_string(),
                second: second.to_string(),
            });
        }

        tracing::debug!(
            model = %model.name,
            fields = fields.len(),
            methods = methods.len(),
            "assembled generation unit"
        );

        Ok(Self {
            name: model.name.clone(),
            file_name: file_name(&model.name),
            deps: deps.into_vec(),
            fields,
            methods,
            dispatch_create,
        })
    }

    /// Name of the module the unit is compiled as.
    #[must_use]
    pub fn module_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Output file of a model: its lower-cased name.
#[must_use]
pub fn file_name(model: &str) -> String {
    format!("{}.rs", model.to_lowercase())
}

fn field_unit(
    model: &str,
    field: &ResolvedField,
    config: &GenerateConfig,
) -> Result<FieldUnit, GenerateError> {
    let resolved = match field.target() {
        Some(target) => resolve_type(model, &TypeRef::record_set_of(target), &config.pool_path),
        None => resolve_type(model, &field.ty, &config.pool_path),
    };
    check_name(model, &field.name)?;
    check_type(model, &field.name, &resolved.name)?;

    Ok(FieldUnit {
        name: field.name.clone(),
        ty: resolved.name,
        is_record_set: resolved.is_record_set,
        readonly: field.readonly,
    })
}

// check_override
// only Create is reached through dispatch; First and All always read the store
fn check_override(model: &ResolvedModel, method: &ResolvedMethod) -> Result<(), GenerateError> {
    if method.name != "Create" {
        return Err(GenerateError::ReservedName {
            model: model.name.clone(),
            member: method.name.clone(),
        });
    }

    let sig = &method.signature;
    let returns_self = matches!(
        &sig.returns,
        Some(TypeRef::RecordSet { model: target })
            if target.as_deref().is_none_or(|t| t == model.name)
    );
    if sig.params.len() != 1 || sig.variadic || !returns_self {
        return Err(GenerateError::InvalidOverride {
            model: model.name.clone(),
            method: method.name.clone(),
        });
    }

    Ok(())
}

fn check_name(model: &str, member: &str) -> Result<(), GenerateError> {
    if WRAPPER_METHODS.contains(&member) {
        return Err(GenerateError::ReservedName {
            model: model.to_string(),
            member: member.to_string(),
        });
    }

    Ok(())
}

fn check_type(model: &str, member: &str, ty: &str) -> Result<(), GenerateError> {
    match syn::parse_str::<syn::Type>(ty) {
        Ok(_) => Ok(()),
        Err(_) => Err(GenerateError::UnresolvableType {
            model: model.to_string(),
            member: member.to_string(),
            ty: ty.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{MethodAstData, MethodRef};
    use yep_schema::prelude::*;

    fn registry() -> ModelRegistry {
        Declarations::new()
            .declare(
                ModelDecl::new("User")
                    .field(FieldDecl::new("UserName", TypeRef::text()))
                    .field(FieldDecl::new(
                        "Birthday",
                        TypeRef::option(TypeRef::named("chrono", "NaiveDate")),
                    ))
                    .field(FieldDecl::many2one("Profile", "Profile"))
                    .method(
                        MethodDecl::new("AddTags")
                            .param(TypeRef::bool())
                            .variadic(TypeRef::record_set_of("Tag")),
                    )
                    .method(MethodDecl::new("Friends").returns(TypeRef::record_set()))
                    .method(
                        MethodDecl::new("Create")
                            .param(TypeRef::named("crate::pool", "User"))
                            .returns(TypeRef::record_set()),
                    ),
            )
            .declare(ModelDecl::new("Profile"))
            .declare(ModelDecl::new("Tag"))
            .bootstrap()
            .unwrap()
    }

    fn ast() -> MethodAstMap {
        MethodAstMap::from_iter([(
            MethodRef::new("User", "AddTags"),
            MethodAstData {
                params: vec!["replace".into(), "tags".into()],
                doc: "Attach tags.".into(),
            },
        )])
    }

    fn assemble(ast: &MethodAstMap) -> Result<GenerationUnit, GenerateError> {
        let registry = registry();
        let user = registry.get("User").unwrap();

        GenerationUnit::assemble(&registry, user, ast, &GenerateConfig::default())
    }

    #[test]
    fn fields_are_resolved_in_order() {
        let unit = assemble(&ast()).unwrap();

        assert_eq!(unit.file_name, "user.rs");
        assert_eq!(unit.deps, vec!["yep::models", "chrono"]);

        let fields: Vec<(&str, &str, bool)> = unit
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.ty.as_str(), f.is_record_set))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("ID", "i64", false),
                ("UserName", "String", false),
                ("Birthday", "Option<chrono::NaiveDate>", false),
                ("Profile", "ProfileSet", true),
            ]
        );
        assert!(unit.fields[0].readonly);
    }

    #[test]
    fn methods_skip_reserved_names_and_resolve_variadics() {
        let unit = assemble(&ast()).unwrap();

        let names: Vec<&str> = unit.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["AddTags", "Friends"]);
        assert!(unit.dispatch_create);

        let add_tags = &unit.methods[0];
        assert_eq!(add_tags.doc, "Attach tags.");
        assert_eq!(
            add_tags.params,
            vec![
                ParamUnit {
                    name: "replace".into(),
                    ty: "bool".into(),
                    is_record_set: false
                },
                ParamUnit {
                    name: "tags".into(),
                    ty: "Vec<TagSet>".into(),
                    is_record_set: false
                },
            ]
        );

        let friends = &unit.methods[1];
        assert_eq!(
            friends.returns,
            Some(ReturnUnit {
                ty: "UserSet".into(),
                is_record_set: true
            })
        );
    }

    #[test]
    fn missing_names_abort_assembly() {
        let err = assemble(&MethodAstMap::new()).unwrap_err();

        assert!(matches!(
            err,
            GenerateError::SignatureMismatch { method, expected: 2, found: 0, .. } if method == "AddTags"
        ));
    }

    #[test]
    fn unparsable_types_are_rejected() {
        let registry = Declarations::new()
            .declare(ModelDecl::new("Bad").field(FieldDecl::new(
                "Value",
                TypeRef::named("some::module", "Not A Type"),
            )))
            .bootstrap()
            .unwrap();

        let err = GenerationUnit::assemble(
            &registry,
            registry.get("Bad").unwrap(),
            &MethodAstMap::new(),
            &GenerateConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::UnresolvableType { member, .. } if member == "Value"));
    }

    #[test]
    fn members_may_not_shadow_set_methods() {
        let registry = Declarations::new()
            .declare(
                ModelDecl::new("Job")
                    .field(FieldDecl::new("State", TypeRef::text()))
                    .method(MethodDecl::new("SetState")),
            )
            .declare(ModelDecl::new("Task").method(MethodDecl::new("load")))
            .bootstrap()
            .unwrap();

        for model in ["Job", "Task"] {
            let err = GenerationUnit::assemble(
                &registry,
                registry.get(model).unwrap(),
                &MethodAstMap::new(),
                &GenerateConfig::default(),
            )
            .unwrap_err();

            assert!(matches!(err, GenerateError::ReservedName { .. }), "{model}");
        }
    }

    fn assemble_one(decls: Declarations, model: &str) -> Result<GenerationUnit, GenerateError> {
        let registry = decls.bootstrap().unwrap();

        GenerationUnit::assemble(
            &registry,
            registry.get(model).unwrap(),
            &MethodAstMap::new(),
            &GenerateConfig::default(),
        )
    }

    #[test]
    fn models_without_create_insert_directly() {
        let unit = assemble_one(Declarations::new().declare(ModelDecl::new("Tag")), "Tag").unwrap();

        assert!(!unit.dispatch_create);
    }

    #[test]
    fn create_overrides_need_the_create_shape() {
        let decls = Declarations::new().declare(
            ModelDecl::new("Tag").method(MethodDecl::new("Create").param(TypeRef::text())),
        );
        let err = assemble_one(decls, "Tag").unwrap_err();
        assert!(matches!(err, GenerateError::InvalidOverride { ref method, .. } if method == "Create"));

        let decls = Declarations::new()
            .declare(ModelDecl::new("Tag").method(
                MethodDecl::new("Create")
                    .param(TypeRef::text())
                    .returns(TypeRef::record_set_of("Post")),
            ))
            .declare(ModelDecl::new("Post"));
        assert!(matches!(
            assemble_one(decls, "Tag"),
            Err(GenerateError::InvalidOverride { .. })
        ));
    }

    #[test]
    fn first_and_all_cannot_be_declared() {
        for name in ["First", "All"] {
            let decls = Declarations::new()
                .declare(ModelDecl::new("Tag").method(MethodDecl::new(name).returns(TypeRef::text())));
            let err = assemble_one(decls, "Tag").unwrap_err();

            assert!(
                matches!(err, GenerateError::ReservedName { ref member, .. } if member == name),
                "{name}"
            );
        }
    }

    #[test]
    fn fields_may_not_shadow_setters() {
        let decls = Declarations::new().declare(
            ModelDecl::new("Job")
                .field(FieldDecl::new("State", TypeRef::text()))
                .field(FieldDecl::new("SetState", TypeRef::bool())),
        );
        let err = assemble_one(decls, "Job").unwrap_err();

        assert!(matches!(err, GenerateError::ReservedName { ref member, .. } if member == "SetState"));
    }

    #[test]
    fn imports_sharing_a_name_are_rejected() {
        let decls = Declarations::new().declare(
            ModelDecl::new("Order")
                .field(FieldDecl::new("Total", TypeRef::named("billing::types", "Money")))
                .field(FieldDecl::new("Parcel", TypeRef::named("shipping::types", "Parcel"))),
        );
        let err = assemble_one(decls, "Order").unwrap_err();

        assert!(matches!(
            err,
            GenerateError::ImportCollision { ref first, ref second, .. }
                if first == "billing::types" && second == "shipping::types"
        ));
    }
}
