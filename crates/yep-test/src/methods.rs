use crate::{pool::*, schema::DEFAULT_CITY};
use yep::{
    method,
    models::{MethodTable, Operator, RecordSet, Value, Values},
};

/// Returns the user name behind the given prefix.
#[method(User)]
pub fn PrefixedUser(rs: &UserSet, prefix: String) -> String {
    format!("{prefix}{}", rs.UserName())
}

/// Returns the posts of the first user carrying one of the tags.
#[method(User)]
pub fn PostsTagged(rs: &UserSet, tags: TagSet) -> PostSet {
    rs.Posts().filter(Post_Tags, Operator::In, tags)
}

/// Creates a profile, filling in the default city.
#[method(Profile)]
pub fn Create(rs: &ProfileSet, mut data: Values) -> ProfileSet {
    if data.get(Profile_City).is_none_or(Value::is_zero) {
        data.insert(Profile_City, Value::from(DEFAULT_CITY));
    }

    ProfileSet::from_collection(rs.collection().create(data))
}

/// Implementations of every declared method.
#[must_use]
pub fn method_table() -> MethodTable {
    MethodTable::new()
        .define(ModelUser, "PrefixedUser", |rs, args| {
            let prefix = first_arg(args).cast();
            Value::from(PrefixedUser(&UserSet::from_collection(rs.clone()), prefix))
        })
        .define(ModelUser, "PostsTagged", |rs, args| {
            let tags = first_arg(args).cast();
            Value::from(PostsTagged(&UserSet::from_collection(rs.clone()), tags))
        })
        .define(ModelProfile, "Create", |rs, args| {
            let data = first_arg(args).cast();
            Value::from(Create(&ProfileSet::from_collection(rs.clone()), data))
        })
}

fn first_arg(args: Vec<Value>) -> Value {
    args.into_iter().next().unwrap_or_default()
}
