use proptest::prelude::*;
use yep_schema::prelude::*;

fn text(name: &str) -> FieldDecl {
    FieldDecl::new(name, TypeRef::text())
}

fn blog() -> Declarations {
    Declarations::new()
        .common_mixin("Base")
        .framework_method(MethodDecl::new("NameGet").returns(TypeRef::text()))
        .declare(
            ModelDecl::new_mixin("Base")
                .field(FieldDecl::new("CreatedBy", TypeRef::text()))
                .method(MethodDecl::new("Touch").doc("Update the write date.")),
        )
        .declare(
            ModelDecl::new_mixin("Auditable")
                .field(text("Note"))
                .method(
                    MethodDecl::new("Audit")
                        .doc("Write an audit line.")
                        .param(TypeRef::text()),
                ),
        )
        .declare(
            ModelDecl::new("User")
                .mixin("Auditable")
                .field(text("UserName"))
                .field(text("Email"))
                .field(FieldDecl::one2many("Posts", "Post", "User"))
                .method(MethodDecl::new("Audit").param(TypeRef::text()))
                .embed("Profile"),
        )
        .declare(
            ModelDecl::new("Profile")
                .field(FieldDecl::new("Age", Primitive::Int32))
                .field(text("City"))
                .method(MethodDecl::new("Describe").returns(TypeRef::record_set())),
        )
        .declare(
            ModelDecl::new("Post")
                .field(FieldDecl::many2one("User", "User"))
                .field(text("Title"))
                .field(FieldDecl::many2many("Tags", "Tag")),
        )
        .declare(ModelDecl::new("Tag").field(text("Name")))
}

fn names(model: &ResolvedModel) -> Vec<&str> {
    model.field_names().collect()
}

#[test]
fn composes_framework_mixins_own_and_embedded_members() {
    let registry = blog().bootstrap().expect("bootstrap");
    let user = registry.get("User").expect("User");

    assert_eq!(
        names(user),
        vec!["ID", "CreatedBy", "Note", "UserName", "Email", "Posts", "Profile", "Age", "City"]
    );
    assert_eq!(user.mixins, vec!["Base".to_string(), "Auditable".to_string()]);

    let id = user.field("ID").unwrap();
    assert!(id.readonly);
    assert_eq!(id.origin, Origin::Framework);

    assert_eq!(
        user.field("CreatedBy").unwrap().origin,
        Origin::Mixin {
            mixin: "Base".into()
        }
    );
    assert_eq!(
        user.field("City").unwrap().origin,
        Origin::Embedded {
            model: "Profile".into(),
            via: "Profile".into()
        }
    );
    assert_eq!(user.field("Profile").unwrap().target(), Some("Profile"));
}

#[test]
fn own_methods_override_mixins_and_inherit_docs() {
    let registry = blog().bootstrap().unwrap();
    let user = registry.get("User").unwrap();

    let audit = user.method("Audit").unwrap();
    assert_eq!(audit.origin, Origin::Own);
    assert_eq!(audit.declared_by, "User");
    assert_eq!(audit.doc, "Write an audit line.");

    let names: Vec<&str> = user.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Audit", "Describe", "NameGet", "Touch"]);
}

#[test]
fn embedded_methods_are_bound_to_the_embedded_model() {
    let registry = blog().bootstrap().unwrap();
    let describe = registry.get("User").unwrap().method("Describe").unwrap();

    assert!(describe.origin.is_embedded());
    assert_eq!(
        describe.signature.returns,
        Some(TypeRef::record_set_of("Profile"))
    );
}

#[test]
fn mixins_are_registered_but_not_concrete() {
    let registry = blog().bootstrap().unwrap();
    let concrete: Vec<&str> = registry
        .concrete_models()
        .map(|m| m.name.as_str())
        .collect();

    assert_eq!(concrete, vec!["Post", "Profile", "Tag", "User"]);
    assert!(registry.get("Base").unwrap().field("ID").is_none());
}

#[test]
fn last_applied_mixin_wins() {
    let decls = Declarations::new()
        .declare(ModelDecl::new_mixin("A").field(FieldDecl::new("Shared", Primitive::Int32)))
        .declare(ModelDecl::new_mixin("B").field(text("Shared")))
        .declare(ModelDecl::new("M").mixin("A").mixin("B"));

    let registry = decls.bootstrap().unwrap();
    let shared = registry.get("M").unwrap().field("Shared").unwrap();

    assert_eq!(shared.ty, TypeRef::text());
    assert_eq!(shared.declared_by, "B");
}

#[test]
fn embedded_members_never_override() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("Address").field(text("City")).field(text("Zip")))
        .declare(
            ModelDecl::new("Partner")
                .field(FieldDecl::new("City", Primitive::Int64))
                .embed("Address"),
        );

    let registry = decls.bootstrap().unwrap();
    let partner = registry.get("Partner").unwrap();

    assert_eq!(partner.field("City").unwrap().origin, Origin::Own);
    assert!(partner.field("Zip").unwrap().origin.is_embedded());
}

#[test]
fn two_embeddings_with_the_same_member_fail() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("Address").field(text("City")))
        .declare(ModelDecl::new("Office").field(text("City")))
        .declare(ModelDecl::new("Partner").embed("Address").embed("Office"));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("embedded from both 'Address' and 'Office'"));
}

#[test]
fn unknown_relation_target_fails() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("Post").field(FieldDecl::many2one("Author", "Person")));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("'Person' is not a declared model"));
}

#[test]
fn relation_to_mixin_fails() {
    let decls = Declarations::new()
        .declare(ModelDecl::new_mixin("Base"))
        .declare(ModelDecl::new("Post").field(FieldDecl::many2one("Owner", "Base")));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("must be a Model, found a Mixin"));
}

#[test]
fn mixin_cycles_fail() {
    let decls = Declarations::new()
        .declare(ModelDecl::new_mixin("A").mixin("B"))
        .declare(ModelDecl::new_mixin("B").mixin("A"))
        .declare(ModelDecl::new("M").mixin("A"));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("composition cycle detected"));
}

#[test]
fn embedding_cycles_fail() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("A").embed("B"))
        .declare(ModelDecl::new("B").embed("A"));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("composition cycle detected: A -> B -> A"));
}

#[test]
fn one2many_reverse_must_point_back() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("User").field(FieldDecl::one2many("Posts", "Post", "Owner")))
        .declare(ModelDecl::new("Post").field(text("Owner")));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("reverse field 'Post.Owner'"));
}

#[test]
fn one2many_reverse_must_target_the_owner() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("User").field(FieldDecl::one2many("Posts", "Post", "Owner")))
        .declare(ModelDecl::new("Team"))
        .declare(ModelDecl::new("Post").field(FieldDecl::many2one("Owner", "Team")));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().contains("must be a many2one or one2one to 'User'"));
}

#[test]
fn every_problem_is_reported_at_once() {
    let decls = Declarations::new()
        .declare(ModelDecl::new("type"))
        .declare(ModelDecl::new("Post").field(FieldDecl::many2one("A", "Nope")).mixin("Gone"));

    let err = decls.bootstrap().unwrap_err();

    assert!(err.errors().len() >= 3, "{err}");
}

#[test]
fn describe_builds_declarations() {
    struct Tag;

    impl Describe for Tag {
        fn describe() -> ModelDecl {
            ModelDecl::new("Tag").field(text("Name"))
        }
    }

    let registry = Declarations::new().model::<Tag>().bootstrap().unwrap();

    assert_eq!(names(registry.get("Tag").unwrap()), vec!["ID", "Name"]);
}

proptest! {
    #[test]
    fn bootstrap_is_idempotent_and_last_mixin_wins(
        layers in prop::collection::vec(prop::collection::btree_set(0u8..6, 0..4), 1..5),
        own in prop::collection::btree_set(0u8..6, 0..3),
    ) {
        let mut decls = Declarations::new();
        let mut model = ModelDecl::new("M");

        for (i, fields) in layers.iter().enumerate() {
            let mixin = format!("Mixin{i}");
            let mut decl = ModelDecl::new_mixin(&mixin);
            for f in fields {
                decl = decl.field(text(&format!("F{f}")));
            }
            decls.register(decl);
            model = model.mixin(&mixin);
        }
        for f in &own {
            model = model.field(text(&format!("F{f}")));
        }
        decls.register(model);

        let first = decls.bootstrap().unwrap();
        let second = decls.bootstrap().unwrap();
        prop_assert_eq!(&first, &second);

        let composed = first.get("M").unwrap();
        for f in 0u8..6 {
            let name = format!("F{f}");
            let expected = if own.contains(&f) {
                Some("M".to_string())
            } else {
                layers
                    .iter()
                    .rposition(|fields| fields.contains(&f))
                    .map(|i| format!("Mixin{i}"))
            };

            prop_assert_eq!(
                composed.field(&name).map(|field| field.declared_by.clone()),
                expected
            );
        }
    }
}
