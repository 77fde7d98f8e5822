use std::fs;
use yep_build::{
    Error, GenerateError, HEADER, PoolBuilder,
    config::GenerateConfig,
    generate,
    scan::scan_source,
    signature::{MethodAstData, MethodAstMap, MethodRef},
    unit::{FieldUnit, GenerationUnit},
};
use yep_schema::prelude::*;

const METHODS: &str = r#"
    /// Returns the user name with the given prefix.
    #[method(User)]
    fn PrefixedUser(rs: UserSet, prefix: String) -> String {
        format!("{prefix}: {}", rs.UserName())
    }

    #[method(User)]
    fn Deactivate(rs: UserSet) {}

    /// Returns the posts carrying one of the tags.
    #[method(Post)]
    fn WithTags(rs: PostSet, tags: TagSet) -> PostSet {
        rs
    }
"#;

fn blog() -> Declarations {
    Declarations::new()
        .declare(
            ModelDecl::new("User")
                .field(FieldDecl::new("UserName", TypeRef::text()))
                .field(FieldDecl::new("Email", TypeRef::text()))
                .field(FieldDecl::many2one("Profile", "Profile"))
                .field(FieldDecl::one2many("Posts", "Post", "User"))
                .field(FieldDecl::new(
                    "LastLogin",
                    TypeRef::option(TypeRef::named("chrono", "NaiveDateTime")),
                ))
                .method(
                    MethodDecl::new("PrefixedUser")
                        .param(TypeRef::text())
                        .returns(TypeRef::text()),
                )
                .method(MethodDecl::new("Deactivate")),
        )
        .declare(
            ModelDecl::new("Profile")
                .field(FieldDecl::new("Age", Primitive::Int32))
                .field(FieldDecl::new("City", TypeRef::text())),
        )
        .declare(
            ModelDecl::new("Post")
                .field(FieldDecl::many2one("User", "User"))
                .field(FieldDecl::new("Title", TypeRef::text()))
                .field(FieldDecl::many2many("Tags", "Tag"))
                .method(
                    MethodDecl::new("WithTags")
                        .param(TypeRef::record_set_of("Tag"))
                        .returns(TypeRef::record_set()),
                ),
        )
        .declare(ModelDecl::new("Tag").field(FieldDecl::new("Name", TypeRef::text())))
}

fn render(model: &str) -> String {
    let registry = blog().bootstrap().unwrap();
    let ast = scan_source(METHODS).unwrap();
    let config = GenerateConfig::default();
    let builder = PoolBuilder::new(&registry, &ast, &config);

    builder.render(&builder.unit(model).unwrap()).unwrap()
}

#[test]
fn user_file_exposes_typed_accessors() {
    let user = render("User");

    assert!(user.starts_with(HEADER));
    for expected in [
        "use super::*;",
        "use yep::models;",
        "use chrono;",
        "pub const User_UserName: models::FieldName = models::FieldName::new(\"UserName\");",
        "pub const User_Profile: models::FieldName = models::FieldName::new(\"Profile\");",
        "pub const ModelUser: models::ModelName = models::ModelName::new(\"User\");",
        "pub struct User {",
        "pub UserName: String,",
        "pub Profile: ProfileSet,",
        "pub Posts: PostSet,",
        "pub LastLogin: Option<chrono::NaiveDateTime>,",
        "pub struct UserSet {",
        "pub fn new(env: &models::Environment) -> Self",
        "pub fn create(&self, data: User) -> UserSet",
        ".create(models::RecordData::into_values(data))",
        "pub fn first(&self) -> User",
        "pub fn all(&self) -> Vec<User>",
        "pub fn records(&self) -> Vec<Self>",
        "pub fn Email(&self) -> String",
        "pub fn SetEmail(&self, value: String)",
        "pub fn Profile(&self) -> ProfileSet",
        "pub fn SetProfile(&self, value: ProfileSet)",
        "pub fn ID(&self) -> i64",
        "/// Returns the user name with the given prefix.",
        "pub fn PrefixedUser(&self, prefix: String) -> String",
        "pub fn Deactivate(&self)",
        "impl models::RecordSet for UserSet",
        "impl models::FieldValue for UserSet",
        "impl models::RecordData for User",
    ] {
        assert!(user.contains(expected), "missing `{expected}` in:\n{user}");
    }

    assert!(!user.contains("SetID"));
    assert!(!user.contains("use crate::pool"));
}

#[test]
fn record_set_methods_are_rewrapped() {
    let post = render("Post");

    assert!(post.contains("pub fn WithTags(&self, tags: TagSet) -> PostSet"));
    assert!(post.contains("<PostSet as models::RecordSet>::from_collection("));
    assert!(post.contains("models::Value::Collection(models::RecordSet::into_collection(tags))"));
    assert!(post.contains("pub fn Tags(&self) -> TagSet"));
}

#[test]
fn generate_writes_one_file_per_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerateConfig::default().with_output_dir(dir.path().join("pool"));
    let ast = scan_source(METHODS).unwrap();

    let written = generate(&blog(), &ast, &config).unwrap();

    let mut names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["mod.rs", "post.rs", "profile.rs", "tag.rs", "user.rs"]);

    let module = fs::read_to_string(dir.path().join("pool/mod.rs")).unwrap();
    assert!(module.contains("mod user;"));
    assert!(module.contains("pub use user::*;"));

    let tag = fs::read_to_string(dir.path().join("pool/tag.rs")).unwrap();
    assert!(tag.contains("pub fn Name(&self) -> String"));
}

#[test]
fn mismatched_signature_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pool");
    let config = GenerateConfig::default().with_output_dir(&out);

    let decls = blog().declare(
        ModelDecl::new("Zebra").method(MethodDecl::new("Stripe").param(TypeRef::int64())),
    );
    let err = generate(&decls, &scan_source(METHODS).unwrap(), &config).unwrap_err();

    assert!(matches!(
        err,
        Error::Generate(GenerateError::SignatureMismatch { ref model, .. }) if model == "Zebra"
    ));
    assert!(!out.exists());
}

#[test]
fn bad_parameter_names_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pool");
    let config = GenerateConfig::default().with_output_dir(&out);

    let decls = Declarations::new().declare(
        ModelDecl::new("Tag")
            .field(FieldDecl::new("Name", TypeRef::text()))
            .method(MethodDecl::new("Rename").param(TypeRef::text())),
    );
    let ast = MethodAstMap::from_iter([(
        MethodRef::new("Tag", "Rename"),
        MethodAstData {
            params: vec!["new name".into()],
            doc: String::new(),
        },
    )]);

    let err = generate(&decls, &ast, &config).unwrap_err();

    assert!(matches!(
        err,
        Error::Generate(GenerateError::InvalidName { ref name, .. }) if name == "new name"
    ));
    assert!(!out.exists());
}

#[test]
fn hand_built_units_fail_instead_of_panicking() {
    let registry = blog().bootstrap().unwrap();
    let ast = MethodAstMap::new();
    let config = GenerateConfig::default();
    let builder = PoolBuilder::new(&registry, &ast, &config);

    let mut unit = GenerationUnit {
        name: "Note".into(),
        file_name: "note.rs".into(),
        deps: vec!["yep::models".into()],
        fields: vec![FieldUnit {
            name: "Body".into(),
            ty: "Not A Type".into(),
            is_record_set: false,
            readonly: false,
        }],
        methods: Vec::new(),
        dispatch_create: false,
    };
    assert!(matches!(
        builder.render(&unit),
        Err(GenerateError::UnresolvableType { ref member, .. }) if member == "Body"
    ));

    unit.fields[0].ty = "String".into();
    unit.fields[0].name = "two words".into();
    assert!(matches!(
        builder.render(&unit),
        Err(GenerateError::InvalidName { ref name, .. }) if name == "two words"
    ));
}

#[test]
fn declared_create_is_dispatched() {
    let decls = Declarations::new().declare(
        ModelDecl::new("Tag")
            .field(FieldDecl::new("Name", TypeRef::text()))
            .method(
                MethodDecl::new("Create")
                    .param(TypeRef::named("crate::pool", "Tag"))
                    .returns(TypeRef::record_set()),
            ),
    );
    let registry = decls.bootstrap().unwrap();
    let ast = MethodAstMap::new();
    let config = GenerateConfig::default();
    let builder = PoolBuilder::new(&registry, &ast, &config);

    let tag = builder.render(&builder.unit("Tag").unwrap()).unwrap();

    assert!(tag.contains("\"Create\""), "{tag}");
    assert!(!tag.contains(".create(models::RecordData::into_values(data))"));
    assert!(!tag.contains("pub fn Create("));
}

#[test]
fn invalid_declarations_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pool");
    let config = GenerateConfig::default().with_output_dir(&out);

    let decls = blog().declare(ModelDecl::new("Broken").mixin("Missing"));
    let err = generate(&decls, &MethodAstMap::new(), &config).unwrap_err();

    assert!(matches!(err, Error::Schema(_)));
    assert!(!out.exists());
}

#[test]
fn regenerating_overwrites_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = GenerateConfig::default().with_output_dir(dir.path());
    let ast = scan_source(METHODS).unwrap();

    fs::write(dir.path().join("tag.rs"), "stale").unwrap();
    generate(&blog(), &ast, &config).unwrap();
    let first = fs::read_to_string(dir.path().join("tag.rs")).unwrap();

    generate(&blog(), &ast, &config).unwrap();
    let second = fs::read_to_string(dir.path().join("tag.rs")).unwrap();

    assert_ne!(first, "stale");
    assert_eq!(first, second);
}

#[test]
fn mixins_are_not_generated() {
    let registry = blog()
        .declare(ModelDecl::new_mixin("Stamped").field(FieldDecl::new("Stamp", TypeRef::int64())))
        .bootstrap()
        .unwrap();
    let config = GenerateConfig::default();
    let ast = scan_source(METHODS).unwrap();
    let builder = PoolBuilder::new(&registry, &ast, &config);

    let names: Vec<String> = builder.units().unwrap().into_iter().map(|u| u.name).collect();

    assert_eq!(names, vec!["Post", "Profile", "Tag", "User"]);
    assert!(matches!(
        builder.unit("Stamped"),
        Err(GenerateError::UnknownModel(_))
    ));
}
