use crate::models::{FieldValue, ModelName, Opaque, RecordCollection, Value, ValueError};
use std::collections::{BTreeMap, btree_map};

///
/// Values
/// field values keyed by field name, the untyped form of a model's data struct
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values(BTreeMap<String, Value>);

impl Values {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.insert(field, value.into());
        self
    }

    pub fn insert(&mut self, field: impl AsRef<str>, value: Value) -> Option<Value> {
        self.0.insert(field.as_ref().to_string(), value)
    }

    /// Remove a value; a missing field reads as `Null`.
    pub fn take(&mut self, field: impl AsRef<str>) -> Value {
        self.0.remove(field.as_ref()).unwrap_or_default()
    }

    #[must_use]
    pub fn get(&self, field: impl AsRef<str>) -> Option<&Value> {
        self.0.get(field.as_ref())
    }

    #[must_use]
    pub fn contains(&self, field: impl AsRef<str>) -> bool {
        self.0.contains_key(field.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for Values {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v))
                .collect(),
        )
    }
}

// a model's data travels to a declared Create method as an opaque value
impl FieldValue for Values {
    fn into_value(self) -> Value {
        Value::Opaque(Opaque::new(self))
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Opaque(opaque) => opaque.downcast_ref::<Self>().cloned().ok_or(
                ValueError::Mismatch {
                    expected: "values",
                    found: "opaque value",
                },
            ),
            other => Err(ValueError::Mismatch {
                expected: "values",
                found: other.kind(),
            }),
        }
    }
}

///
/// RecordData
/// implemented by the generated data struct of every model
///

pub trait RecordData: Default {
    fn into_values(self) -> Values;

    fn from_values(values: Values) -> Self;
}

impl RecordData for Values {
    fn into_values(self) -> Values {
        self
    }

    fn from_values(values: Values) -> Self {
        values
    }
}

///
/// RecordSet
/// implemented by the generated typed set of every model
///

pub trait RecordSet: Sized {
    const MODEL: ModelName;

    fn from_collection(collection: RecordCollection) -> Self;

    fn collection(&self) -> &RecordCollection;

    fn into_collection(self) -> RecordCollection;
}
