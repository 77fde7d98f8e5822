use crate::{ThisError, models::RecordCollection};
use std::{any::Any, cmp::Ordering, fmt, rc::Rc};

///
/// ValueError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
}

///
/// Value
/// a field value as it travels between typed wrappers and the generic collection
///

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers above `i64::MAX`; smaller ones are `Int`.
    Nat(u64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
    Collection(RecordCollection),
    Opaque(Opaque),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Nat(_) => "nat",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Collection(_) => "record collection",
            Self::Opaque(_) => "opaque value",
        }
    }

    /// Zero values are skipped when writing without an explicit field list.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Nat(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Collection(c) => c.is_empty(),
            Self::Opaque(_) => false,
        }
    }

    /// Convert into a typed value.
    ///
    /// # Panics
    ///
    /// Panics when the value does not hold a `T`; generated accessors only
    /// cast values read from fields declared with that type.
    #[must_use]
    pub fn cast<T: FieldValue>(self) -> T {
        self.try_cast()
            .unwrap_or_else(|err| panic!("cannot cast value: {err}"))
    }

    pub fn try_cast<T: FieldValue>(self) -> Result<T, ValueError> {
        T::from_value(self)
    }

    /// Order two scalar values; numbers compare across int and float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Nat(a), Self::Nat(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Nat(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::Nat(a), Self::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Nat(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Nat(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Record ids carried by a value used against a relation field.
    #[must_use]
    pub fn ids(&self) -> Option<Vec<i64>> {
        match self {
            Self::Null => Some(Vec::new()),
            Self::Int(id) => Some(vec![*id]),
            Self::Collection(c) => Some(c.ids().to_vec()),
            Self::List(items) => items
                .iter()
                .map(|item| match item {
                    Self::Int(id) => Some(*id),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    const fn mismatch(&self, expected: &'static str) -> ValueError {
        ValueError::Mismatch {
            expected,
            found: self.kind(),
        }
    }
}

///
/// Opaque
/// any other Rust value, compared by identity
///

#[derive(Clone)]
pub struct Opaque(Rc<dyn Any>);

impl Opaque {
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

///
/// FieldValue
/// conversion between a field's Rust type and `Value`; `Null` reads as the zero value
///

pub trait FieldValue: Sized {
    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl FieldValue for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl FieldValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(b),
            other => Err(other.mismatch("bool")),
        }
    }
}

impl FieldValue for String {
    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch("text")),
        }
    }
}

macro_rules! impl_int {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn into_value(self) -> Value {
                Value::Int(i64::from(self))
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                int_from_value(value, stringify!($ty))
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                v.into_value()
            }
        }
    )*};
}

impl_int!(i32, i64, u32);

impl FieldValue for u64 {
    fn into_value(self) -> Value {
        i64::try_from(self).map_or(Value::Nat(self), Value::Int)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        int_from_value(value, "u64")
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        v.into_value()
    }
}

fn int_from_value<T>(value: Value, target: &'static str) -> Result<T, ValueError>
where
    T: Default + TryFrom<i64> + TryFrom<u64>,
{
    let out_of_range = |value: String| ValueError::OutOfRange { value, target };

    match value {
        Value::Null => Ok(T::default()),
        Value::Int(i) => <T as TryFrom<i64>>::try_from(i).map_err(|_| out_of_range(i.to_string())),
        Value::Nat(n) => <T as TryFrom<u64>>::try_from(n).map_err(|_| out_of_range(n.to_string())),
        other => Err(other.mismatch(target)),
    }
}

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl FieldValue for $ty {
            fn into_value(self) -> Value {
                Value::Float(f64::from(self))
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Null => Ok(0.0),
                    Value::Float(f) => Ok(f as $ty),
                    Value::Int(i) => Ok(i as $ty),
                    Value::Nat(n) => Ok(n as $ty),
                    other => Err(other.mismatch(stringify!($ty))),
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                v.into_value()
            }
        }
    )*};
}

impl_float!(f32, f64);

impl<T: FieldValue> FieldValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, FieldValue::into_value)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(FieldValue::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other.mismatch("list")),
        }
    }
}

impl FieldValue for RecordCollection {
    fn into_value(self) -> Value {
        Value::Collection(self)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Collection(c) => Ok(c),
            other => Err(other.mismatch("record collection")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<RecordCollection> for Value {
    fn from(c: RecordCollection) -> Self {
        Self::Collection(c)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_casts_to_zero_values() {
        assert_eq!(Value::Null.cast::<String>(), "");
        assert_eq!(Value::Null.cast::<i64>(), 0);
        assert!(!Value::Null.cast::<bool>());
        assert_eq!(Value::Null.cast::<Option<i32>>(), None);
        assert!(Value::Null.cast::<Vec<String>>().is_empty());
        assert!(Value::Null.cast::<RecordCollection>().is_empty());
    }

    #[test]
    fn ints_check_their_range() {
        assert_eq!(Value::Int(7).try_cast::<u32>(), Ok(7));
        assert!(matches!(
            Value::Int(-1).try_cast::<u32>(),
            Err(ValueError::OutOfRange { target: "u32", .. })
        ));
    }

    #[test]
    fn large_unsigned_values_are_kept_exactly() {
        let big = Value::from(u64::MAX);

        assert_eq!(big, Value::Nat(u64::MAX));
        assert_eq!(big.clone().try_cast::<u64>(), Ok(u64::MAX));
        assert!(matches!(
            big.clone().try_cast::<i64>(),
            Err(ValueError::OutOfRange { target: "i64", .. })
        ));
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert_eq!(big.compare(&Value::Int(i64::MAX)), Some(Ordering::Greater));
        assert_eq!(Value::Int(-1).compare(&big), Some(Ordering::Less));
    }

    #[test]
    fn mismatches_are_errors() {
        assert_eq!(
            Value::Text("x".into()).try_cast::<bool>(),
            Err(ValueError::Mismatch {
                expected: "bool",
                found: "text"
            })
        );
    }

    #[test]
    #[should_panic(expected = "cannot cast value")]
    fn cast_panics_on_mismatch() {
        let _ = Value::Bool(true).cast::<String>();
    }

    #[test]
    fn zero_values() {
        assert!(Value::Text(String::new()).is_zero());
        assert!(Value::Int(0).is_zero());
        assert!(!Value::Float(0.5).is_zero());
        assert!(!Value::Bool(true).is_zero());
    }

    #[test]
    fn numbers_compare_across_kinds() {
        assert_eq!(Value::Int(2).compare(&Value::Float(2.5)), Some(Ordering::Less));
        assert_eq!(Value::Text("b".into()).compare(&Value::Text("a".into())), Some(Ordering::Greater));
        assert_eq!(Value::Int(1).compare(&Value::Text("1".into())), None);
    }

    #[test]
    fn opaque_values_round_trip_by_identity() {
        let value = Opaque::new(vec![1u8, 2]);
        let copy = value.clone();

        assert_eq!(value, copy);
        assert_ne!(value, Opaque::new(vec![1u8, 2]));
        assert_eq!(copy.downcast_ref::<Vec<u8>>(), Some(&vec![1, 2]));
    }

    #[test]
    fn lists_carry_ids() {
        let list = Value::from(vec![1i64, 2]);

        assert_eq!(list.ids(), Some(vec![1, 2]));
        assert_eq!(Value::Text("x".into()).ids(), None);
    }
}
