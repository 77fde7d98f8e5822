use yep::schema::prelude::*;

/// Default city of a profile created without one.
pub const DEFAULT_CITY: &str = "Paris";

/// Models the test pool is generated from.
#[must_use]
pub fn declarations() -> Declarations {
    Declarations::new()
        .declare(
            ModelDecl::new("User")
                .field(FieldDecl::new("UserName", TypeRef::text()))
                .field(FieldDecl::new("Email", TypeRef::text()))
                .field(FieldDecl::new("Visits", Primitive::Nat64))
                .field(FieldDecl::many2one("Profile", "Profile"))
                .field(FieldDecl::one2many("Posts", "Post", "Author"))
                .method(
                    MethodDecl::new("PrefixedUser")
                        .param(TypeRef::text())
                        .returns(TypeRef::text()),
                )
                .method(
                    MethodDecl::new("PostsTagged")
                        .param(TypeRef::record_set_of("Tag"))
                        .returns(TypeRef::record_set_of("Post")),
                ),
        )
        .declare(
            ModelDecl::new("Profile")
                .field(FieldDecl::new("Age", Primitive::Int32))
                .field(FieldDecl::new("City", TypeRef::text()))
                .method(
                    MethodDecl::new("Create")
                        .param(TypeRef::named("yep::models", "Values"))
                        .returns(TypeRef::record_set()),
                ),
        )
        .declare(
            ModelDecl::new("Post")
                .field(FieldDecl::new("Title", TypeRef::text()))
                .field(FieldDecl::many2one("Author", "User"))
                .field(FieldDecl::many2many("Tags", "Tag")),
        )
        .declare(ModelDecl::new("Tag").field(FieldDecl::new("Name", TypeRef::text())))
}
