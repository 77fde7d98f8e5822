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
pub const Profile_ID: models::FieldName = models::FieldName::new("ID");
pub const Profile_Age: models::FieldName = models::FieldName::new("Age");
pub const Profile_City: models::FieldName = models::FieldName::new("City");
pub const ModelProfile: models::ModelName = models::ModelName::new("Profile");
/// Profile is an autogenerated struct type to handle Profile data.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    pub ID: i64,
    pub Age: i32,
    pub City: String,
}
impl models::RecordData for Profile {
    fn into_values(self) -> models::Values {
        let mut values = models::Values::new();
        values.insert(Profile_ID, models::FieldValue::into_value(self.ID));
        values.insert(Profile_Age, models::FieldValue::into_value(self.Age));
        values.insert(Profile_City, models::FieldValue::into_value(self.City));
        values
    }
    fn from_values(mut values: models::Values) -> Self {
        Self {
            ID: values.take(Profile_ID).cast(),
            Age: values.take(Profile_Age).cast(),
            City: values.take(Profile_City).cast(),
        }
    }
}
/// ProfileSet is an autogenerated type to handle Profile objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileSet {
    collection: models::RecordCollection,
}
impl ProfileSet {
    /// Returns a new ProfileSet bound to the given environment.
    pub fn new(env: &models::Environment) -> Self {
        Self {
            collection: env.pool(ModelProfile),
        }
    }
    /// Creates a new record from the given data and returns it.
    pub fn create(&self, data: Profile) -> ProfileSet {
        Self {
            collection: self
                .collection
                .call(
                    "Create",
                    [
                        models::FieldValue::into_value(
                            models::RecordData::into_values(data),
                        ),
                    ],
                )
                .cast(),
        }
    }
    /// Updates every record with the given data.
    ///
    /// Only the listed fields are written, or every non-zero field when none are listed.
    pub fn write(&self, data: Profile, fields: &[models::FieldName]) {
        self.collection.write(models::RecordData::into_values(data), fields);
    }
    /// Returns the data of the first record, or the zero value when empty.
    pub fn first(&self) -> Profile {
        self.collection.first::<Profile>()
    }
    /// Returns the data of every record.
    pub fn all(&self) -> Vec<Profile> {
        self.collection.all::<Profile>()
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
impl ::std::ops::Deref for ProfileSet {
    type Target = models::RecordCollection;
    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
impl models::RecordSet for ProfileSet {
    const MODEL: models::ModelName = ModelProfile;
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
impl From<ProfileSet> for models::Value {
    fn from(set: ProfileSet) -> Self {
        models::Value::Collection(set.collection)
    }
}
impl models::FieldValue for ProfileSet {
    fn into_value(self) -> models::Value {
        models::Value::Collection(self.collection)
    }
    fn from_value(value: models::Value) -> Result<Self, models::ValueError> {
        <models::RecordCollection as models::FieldValue>::from_value(value)
            .map(|collection| Self { collection })
    }
}
impl ProfileSet {
    /// Gets the value of the ID field of the first record.
    pub fn ID(&self) -> i64 {
        self.collection.get(Profile_ID).cast()
    }
    /// Gets the value of the Age field of the first record.
    pub fn Age(&self) -> i32 {
        self.collection.get(Profile_Age).cast()
    }
    /// Sets the value of the Age field on every record.
    pub fn SetAge(&self, value: i32) {
        self.collection.set(Profile_Age, models::FieldValue::into_value(value));
    }
    /// Gets the value of the City field of the first record.
    pub fn City(&self) -> String {
        self.collection.get(Profile_City).cast()
    }
    /// Sets the value of the City field on every record.
    pub fn SetCity(&self, value: String) {
        self.collection.set(Profile_City, models::FieldValue::into_value(value));
    }
}
