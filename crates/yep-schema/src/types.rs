use derive_more::{Display, FromStr};

///
/// Primitive
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Float32,
    Float64,
    Int32,
    Int64,
    Nat32,
    Nat64,
    Text,
}

impl Primitive {
    /// The Rust type a field of this primitive is stored as.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Nat32 => "u32",
            Self::Nat64 => "u64",
            Self::Text => "String",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Bool | Self::Text)
    }
}

///
/// RelationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq)]
pub enum RelationKind {
    Many2Many,
    Many2One,
    One2Many,
    One2One,
}

impl RelationKind {
    /// Single-related kinds point at no more than one record.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self, Self::Many2One | Self::One2One)
    }

    #[must_use]
    pub const fn is_multi(self) -> bool {
        !self.is_single()
    }
}

///
/// TypeRef
/// a declared value type, as written on a field or method signature
///
/// `RecordSet { model: None }` refers to the model the member is declared on.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeRef {
    Primitive(Primitive),
    Named { path: String, ident: String },
    Boxed(Box<Self>),
    Option(Box<Self>),
    Vec(Box<Self>),
    RecordSet { model: Option<String> },
}

impl TypeRef {
    #[must_use]
    pub fn named(path: &str, ident: &str) -> Self {
        Self::Named {
            path: path.to_string(),
            ident: ident.to_string(),
        }
    }

    #[must_use]
    pub fn boxed(inner: Self) -> Self {
        Self::Boxed(Box::new(inner))
    }

    #[must_use]
    pub fn option(inner: Self) -> Self {
        Self::Option(Box::new(inner))
    }

    #[must_use]
    pub fn vec(inner: Self) -> Self {
        Self::Vec(Box::new(inner))
    }

    #[must_use]
    pub const fn record_set() -> Self {
        Self::RecordSet { model: None }
    }

    #[must_use]
    pub fn record_set_of(model: &str) -> Self {
        Self::RecordSet {
            model: Some(model.to_string()),
        }
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::Primitive(Primitive::Text)
    }

    #[must_use]
    pub const fn bool() -> Self {
        Self::Primitive(Primitive::Bool)
    }

    #[must_use]
    pub const fn int64() -> Self {
        Self::Primitive(Primitive::Int64)
    }

    #[must_use]
    pub const fn float64() -> Self {
        Self::Primitive(Primitive::Float64)
    }

    /// Strip every wrapper layer and return the named, primitive or record set type below.
    #[must_use]
    pub fn base(&self) -> &Self {
        match self {
            Self::Boxed(inner) | Self::Option(inner) | Self::Vec(inner) => inner.base(),
            other => other,
        }
    }

    #[must_use]
    pub const fn is_record_set(&self) -> bool {
        matches!(self, Self::RecordSet { .. })
    }

    /// Resolve a self-referencing record set against the model it is declared on.
    #[must_use]
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            Self::RecordSet { model: None } => Self::record_set_of(model),
            Self::Boxed(inner) => Self::boxed(inner.with_model(model)),
            Self::Option(inner) => Self::option(inner.with_model(model)),
            Self::Vec(inner) => Self::vec(inner.with_model(model)),
            other => other.clone(),
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_strips_every_wrapper() {
        let ty = TypeRef::option(TypeRef::vec(TypeRef::boxed(TypeRef::named(
            "chrono", "NaiveDate",
        ))));

        assert_eq!(ty.base(), &TypeRef::named("chrono", "NaiveDate"));
    }

    #[test]
    fn with_model_fills_only_self_record_sets() {
        assert_eq!(
            TypeRef::vec(TypeRef::record_set()).with_model("User"),
            TypeRef::vec(TypeRef::record_set_of("User"))
        );
        assert_eq!(
            TypeRef::record_set_of("Tag").with_model("User"),
            TypeRef::record_set_of("Tag")
        );
    }

    #[test]
    fn primitive_parses_from_name() {
        assert_eq!("Text".parse::<Primitive>().ok(), Some(Primitive::Text));
        assert_eq!(Primitive::Nat64.rust_type(), "u64");
        assert!("Float128".parse::<Primitive>().is_err());
    }

    #[test]
    fn relation_kind_arity() {
        assert!(RelationKind::Many2One.is_single());
        assert!(RelationKind::One2One.is_single());
        assert!(RelationKind::One2Many.is_multi());
        assert!(RelationKind::Many2Many.is_multi());
    }
}
