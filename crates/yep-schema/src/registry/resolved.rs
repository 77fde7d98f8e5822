use crate::{
    node::{ModelKind, Relation, Signature},
    types::TypeRef,
};

///
/// Origin
/// where a composed member came from
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Origin {
    /// Added to every model by the framework.
    Framework,

    /// Declared by the model itself.
    Own,

    /// Contributed by the named mixin (possibly through its own mixins).
    Mixin { mixin: String },

    /// Delegated to the embedded model, reached through the `via` link field.
    Embedded { model: String, via: String },
}

impl Origin {
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    #[must_use]
    pub const fn is_framework(&self) -> bool {
        matches!(self, Self::Framework)
    }
}

///
/// Member
///

pub trait Member: Clone {
    fn name(&self) -> &str;

    fn origin(&self) -> &Origin;

    #[must_use]
    fn with_origin(self, origin: Origin) -> Self;
}

///
/// ResolvedField
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedField {
    pub name: String,
    pub ty: TypeRef,
    pub relation: Option<Relation>,
    pub readonly: bool,
    pub doc: Option<String>,
    pub origin: Origin,

    /// Model whose declaration holds this field; empty for framework fields.
    pub declared_by: String,
}

impl ResolvedField {
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        self.relation.is_some()
    }

    /// Target model of a relational field.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.relation.as_ref().map(|r| r.target.as_str())
    }
}

impl Member for ResolvedField {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }
}

///
/// ResolvedMethod
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedMethod {
    pub name: String,
    pub doc: String,
    pub signature: Signature,
    pub origin: Origin,
    pub declared_by: String,
}

impl Member for ResolvedMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }
}

///
/// ResolvedModel
/// a model after every mixin and embedding has been folded in
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedModel {
    pub name: String,
    pub kind: ModelKind,
    pub doc: Option<String>,
    pub fields: Vec<ResolvedField>,

    /// Sorted by name.
    pub methods: Vec<ResolvedMethod>,

    /// Every mixin applied, least recently applied first.
    pub mixins: Vec<String>,
    pub embeds: Vec<String>,
}

impl ResolvedModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&ResolvedMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub const fn is_mixin(&self) -> bool {
        matches!(self.kind, ModelKind::Mixin)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
