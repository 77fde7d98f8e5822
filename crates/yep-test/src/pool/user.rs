// This file is autogenerated by yep-generate
// DO NOT MODIFY THIS FILE - ANY CHANGES WILL BE OVERWRITTEN

#![allow(
    non_snake_case,
    non_upper_case_globals,
    unused_imports,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
use super::*;
use yep::models;
pub const User_ID: models::FieldName = models::FieldName::new("ID");
pub const User_UserName: models::FieldName = models::FieldName::new("UserName");
pub const User_Email: models::FieldName = models::FieldName::new("Email");
pub const User_Visits: models::FieldName = models::FieldName::new("Visits");
pub const User_Profile: models::FieldName = models::FieldName::new("Profile");
pub const User_Posts: models::FieldName = models::FieldName::new("Posts");
pub const ModelUser: models::ModelName = models::ModelName::new("User");
/// User is an autogenerated struct type to handle User data.
#[derive(Clone, Debug, Default)]
pub struct User {
    pub ID: i64,
    pub UserName: String,
    pub Email: String,
    pub Visits: u64,
    pub Profile: ProfileSet,
    pub Posts: PostSet,
}
impl models::RecordData for User {
    fn into_values(self) -> models::Values {
        let mut values = models::Values::new();
        values.insert(User_ID, models::FieldValue::into_value(self.ID));
        values.insert(User_UserName, models::FieldValue::into_value(self.UserName));
        values.insert(User_Email, models::FieldValue::into_value(self.Email));
        values.insert(User_Visits, models::FieldValue::into_value(self.Visits));
        values.insert(User_Profile, models::FieldValue::into_value(self.Profile));
        values.insert(User_Posts, models::FieldValue::into_value(self.Posts));
        values
    }
    fn from_values(mut values: models::Values) -> Self {
        Self {
            ID: values.take(User_ID).cast(),
            UserName: values.take(User_UserName).cast(),
            Email: values.take(User_Email).cast(),
            Visits: values.take(User_Visits).cast(),
            Profile: values.take(User_Profile).cast(),
            Posts: values.take(User_Posts).cast(),
        }
    }
}
/// UserSet is an autogenerated type to handle User objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserSet {
    collection: models::RecordCollection,
}
impl UserSet {
    /// Returns a new UserSet bound to the given environment.
    pub fn new(env: &models::Environment) -> Self {
        Self {
            collection: env.pool(ModelUser),
        }
    }
    /// Creates a new record from the given data and returns it.
    pub fn create(&self, data: User) -> UserSet {
        Self {
            collection: self.collection.create(models::RecordData::into_values(data)),
        }
    }
    /// Updates every record with the given data.
    ///
    /// Only the listed fields are written, or every non-zero field when none are listed.
    pub fn write(&self, data: User, fields: &[models::FieldName]) {
        self.collection.write(models::RecordData::into_values(data), fields);
    }
    /// Returns the data of the first record, or the zero value when empty.
    pub fn first(&self) -> User {
        self.collection.first::<User>()
    }
    /// Returns the data of every record.
    pub fn all(&self) -> Vec<User> {
        self.collection.all::<User>()
    }
    /// Returns one singleton per record.
    pub fn records(&self) -> Vec<Self> {
        self.collection
            .records()
            .into_iter()
            .map(|collection| Self { collection })
            .collect()
    }
    pub fn search(&self, condition: models::Condition) -> Self {
        Self {
            collection: self.collection.search(condition),
        }
    }
    pub fn filter(
        &self,
        field: impl AsRef<str>,
        operator: models::Operator,
        value: impl Into<models::Value>,
    ) -> Self {
        Self {
            collection: self.collection.filter(field, operator, value),
        }
    }
    pub fn load(&self) -> Self {
        Self {
            collection: self.collection.load(),
        }
    }
    pub fn union(&self, other: &Self) -> Self {
        Self {
            collection: self.collection.union(&other.collection),
        }
    }
}
impl ::std::ops::Deref for UserSet {
    type Target = models::RecordCollection;
    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
impl models::RecordSet for UserSet {
    const MODEL: models::ModelName = ModelUser;
    fn from_collection(collection: models::RecordCollection) -> Self {
        Self { collection }
    }
    fn collection(&self) -> &models::RecordCollection {
        &self.collection
    }
    fn into_collection(self) -> models::RecordCollection {
        self.collection
    }
}
impl From<UserSet> for models::Value {
    fn from(set: UserSet) -> Self {
        models::Value::Collection(set.collection)
    }
}
impl models::FieldValue for UserSet {
    fn into_value(self) -> models::Value {
        models::Value::Collection(self.collection)
    }
    fn from_value(value: models::Value) -> Result<Self, models::ValueError> {
        <models::RecordCollection as models::FieldValue>::from_value(value)
            .map(|collection| Self { collection })
    }
}
impl UserSet {
    /// Gets the value of the ID field of the first record.
    pub fn ID(&self) -> i64 {
        self.collection.get(User_ID).cast()
    }
    /// Gets the value of the UserName field of the first record.
    pub fn UserName(&self) -> String {
        self.collection.get(User_UserName).cast()
    }
    /// Sets the value of the UserName field on every record.
    pub fn SetUserName(&self, value: String) {
        self.collection.set(User_UserName, models::FieldValue::into_value(value));
    }
    /// Gets the value of the Email field of the first record.
    pub fn Email(&self) -> String {
        self.collection.get(User_Email).cast()
    }
    /// Sets the value of the Email field on every record.
    pub fn SetEmail(&self, value: String) {
        self.collection.set(User_Email, models::FieldValue::into_value(value));
    }
    /// Gets the value of the Visits field of the first record.
    pub fn Visits(&self) -> u64 {
        self.collection.get(User_Visits).cast()
    }
    /// Sets the value of the Visits field on every record.
    pub fn SetVisits(&self, value: u64) {
        self.collection.set(User_Visits, models::FieldValue::into_value(value));
    }
    /// Gets the value of the Profile field of the first record.
    pub fn Profile(&self) -> ProfileSet {
        <ProfileSet as models::RecordSet>::from_collection(
            self.collection.get(User_Profile).cast(),
        )
    }
    /// Sets the value of the Profile field on every record.
    pub fn SetProfile(&self, value: ProfileSet) {
        self.collection
            .set(
                User_Profile,
                models::Value::Collection(models::RecordSet::into_collection(value)),
            );
    }
    /// Gets the value of the Posts field of the first record.
    pub fn Posts(&self) -> PostSet {
        <PostSet as models::RecordSet>::from_collection(
            self.collection.get(User_Posts).cast(),
        )
    }
    /// Sets the value of the Posts field on every record.
    pub fn SetPosts(&self, value: PostSet) {
        self.collection
            .set(
                User_Posts,
                models::Value::Collection(models::RecordSet::into_collection(value)),
            );
    }
    /// Returns the posts of the first user carrying one of the tags.
    pub fn PostsTagged(&self, tags: TagSet) -> PostSet {
        let args: [models::Value; 1] = [
            models::Value::Collection(models::RecordSet::into_collection(tags)),
        ];
        <PostSet as models::RecordSet>::from_collection(
            self.collection.call("PostsTagged", args).cast(),
        )
    }
    /// Returns the user name behind the given prefix.
    pub fn PrefixedUser(&self, prefix: String) -> String {
        let args: [models::Value; 1] = [models::FieldValue::into_value(prefix)];
        self.collection.call("PrefixedUser", args).cast()
    }
}
