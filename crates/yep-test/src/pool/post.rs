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
pub const Post_ID: models::FieldName = models::FieldName::new("ID");
pub const Post_Title: models::FieldName = models::FieldName::new("Title");
pub const Post_Author: models::FieldName = models::FieldName::new("Author");
pub const Post_Tags: models::FieldName = models::FieldName::new("Tags");
pub const ModelPost: models::ModelName = models::ModelName::new("Post");
/// Post is an autogenerated struct type to handle Post data.
#[derive(Clone, Debug, Default)]
pub struct Post {
    pub ID: i64,
    pub Title: String,
    pub Author: UserSet,
    pub Tags: TagSet,
}
impl models::RecordData for Post {
    fn into_values(self) -> models::Values {
        let mut values = models::Values::new();
        values.insert(Post_ID, models::FieldValue::into_value(self.ID));
        values.insert(Post_Title, models::FieldValue::into_value(self.Title));
        values.insert(Post_Author, models::FieldValue::into_value(self.Author));
        values.insert(Post_Tags, models::FieldValue::into_value(self.Tags));
        values
    }
    fn from_values(mut values: models::Values) -> Self {
        Self {
            ID: values.take(Post_ID).cast(),
            Title: values.take(Post_Title).cast(),
            Author: values.take(Post_Author).cast(),
            Tags: values.take(Post_Tags).cast(),
        }
    }
}
/// PostSet is an autogenerated type to handle Post objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostSet {
    collection: models::RecordCollection,
}
impl PostSet {
    /// Returns a new PostSet bound to the given environment.
    pub fn new(env: &models::Environment) -> Self {
        Self {
            collection: env.pool(ModelPost),
        }
    }
    /// Creates a new record from the given data and returns it.
    pub fn create(&self, data: Post) -> PostSet {
        Self {
            collection: self.collection.create(models::RecordData::into_values(data)),
        }
    }
    /// Updates every record with the given data.
    ///
    /// Only the listed fields are written, or every non-zero field when none are listed.
    pub fn write(&self, data: Post, fields: &[models::FieldName]) {
        self.collection.write(models::RecordData::into_values(data), fields);
    }
    /// Returns the data of the first record, or the zero value when empty.
    pub fn first(&self) -> Post {
        self.collection.first::<Post>()
    }
    /// Returns the data of every record.
    pub fn all(&self) -> Vec<Post> {
        self.collection.all::<Post>()
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
impl ::std::ops::Deref for PostSet {
    type Target = models::RecordCollection;
    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
impl models::RecordSet for PostSet {
    const MODEL: models::ModelName = ModelPost;
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
impl From<PostSet> for models::Value {
    fn from(set: PostSet) -> Self {
        models::Value::Collection(set.collection)
    }
}
impl models::FieldValue for PostSet {
    fn into_value(self) -> models::Value {
        models::Value::Collection(self.collection)
    }
    fn from_value(value: models::Value) -> Result<Self, models::ValueError> {
        <models::RecordCollection as models::FieldValue>::from_value(value)
            .map(|collection| Self { collection })
    }
}
impl PostSet {
    /// Gets the value of the ID field of the first record.
    pub fn ID(&self) -> i64 {
        self.collection.get(Post_ID).cast()
    }
    /// Gets the value of the Title field of the first record.
    pub fn Title(&self) -> String {
        self.collection.get(Post_Title).cast()
    }
    /// Sets the value of the Title field on every record.
    pub fn SetTitle(&self, value: String) {
        self.collection.set(Post_Title, models::FieldValue::into_value(value));
    }
    /// Gets the value of the Author field of the first record.
    pub fn Author(&self) -> UserSet {
        <UserSet as models::RecordSet>::from_collection(
            self.collection.get(Post_Author).cast(),
        )
    }
    /// Sets the value of the Author field on every record.
    pub fn SetAuthor(&self, value: UserSet) {
        self.collection
            .set(
                Post_Author,
                models::Value::Collection(models::RecordSet::into_collection(value)),
            );
    }
    /// Gets the value of the Tags field of the first record.
    pub fn Tags(&self) -> TagSet {
        <TagSet as models::RecordSet>::from_collection(
            self.collection.get(Post_Tags).cast(),
        )
    }
    /// Sets the value of the Tags field on every record.
    pub fn SetTags(&self, value: TagSet) {
        self.collection
            .set(
                Post_Tags,
                models::Value::Collection(models::RecordSet::into_collection(value)),
            );
    }
}
