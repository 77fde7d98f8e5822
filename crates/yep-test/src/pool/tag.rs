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
pub const Tag_ID: models::FieldName = models::FieldName::new("ID");
pub const Tag_Name: models::FieldName = models::FieldName::new("Name");
pub const ModelTag: models::ModelName = models::ModelName::new("Tag");
/// Tag is an autogenerated struct type to handle Tag data.
#[derive(Clone, Debug, Default)]
pub struct Tag {
    pub ID: i64,
    pub Name: String,
}
impl models::RecordData for Tag {
    fn into_values(self) -> models::Values {
        let mut values = models::Values::new();
        values.insert(Tag_ID, models::FieldValue::into_value(self.ID));
        values.insert(Tag_Name, models::FieldValue::into_value(self.Name));
        values
    }
    fn from_values(mut values: models::Values) -> Self {
        Self {
            ID: values.take(Tag_ID).cast(),
            Name: values.take(Tag_Name).cast(),
        }
    }
}
/// TagSet is an autogenerated type to handle Tag objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagSet {
    collection: models::RecordCollection,
}
impl TagSet {
    /// Returns a new TagSet bound to the given environment.
    pub fn new(env: &models::Environment) -> Self {
        Self {
            collection: env.pool(ModelTag),
        }
    }
    /// Creates a new record from the given data and returns it.
    pub fn create(&self, data: Tag) -> TagSet {
        Self {
            collection: self.collection.create(models::RecordData::into_values(data)),
        }
    }
    /// Updates every record with the given data.
    ///
    /// Only the listed fields are written, or every non-zero field when none are listed.
    pub fn write(&self, data: Tag, fields: &[models::FieldName]) {
        self.collection.write(models::RecordData::into_values(data), fields);
    }
    /// Returns the data of the first record, or the zero value when empty.
    pub fn first(&self) -> Tag {
        self.collection.first::<Tag>()
    }
    /// Returns the data of every record.
    pub fn all(&self) -> Vec<Tag> {
        self.collection.all::<Tag>()
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
impl ::std::ops::Deref for TagSet {
    type Target = models::RecordCollection;
    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
impl models::RecordSet for TagSet {
    const MODEL: models::ModelName = ModelTag;
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
impl From<TagSet> for models::Value {
    fn from(set: TagSet) -> Self {
        models::Value::Collection(set.collection)
    }
}
impl models::FieldValue for TagSet {
    fn into_value(self) -> models::Value {
        models::Value::Collection(self.collection)
    }
    fn from_value(value: models::Value) -> Result<Self, models::ValueError> {
        <models::RecordCollection as models::FieldValue>::from_value(value)
            .map(|collection| Self { collection })
    }
}
impl TagSet {
    /// Gets the value of the ID field of the first record.
    pub fn ID(&self) -> i64 {
        self.collection.get(Tag_ID).cast()
    }
    /// Gets the value of the Name field of the first record.
    pub fn Name(&self) -> String {
        self.collection.get(Tag_Name).cast()
    }
    /// Sets the value of the Name field on every record.
    pub fn SetName(&self, value: String) {
        self.collection.set(Tag_Name, models::FieldValue::into_value(value));
    }
}
