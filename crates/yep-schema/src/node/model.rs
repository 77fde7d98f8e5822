use crate::node::{FieldDecl, MethodDecl};

///
/// ModelKind
/// mixins only contribute members to other models and are never generated
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ModelKind {
    #[default]
    Model,
    Mixin,
}

///
/// ModelDecl
/// a model as declared, before any mixin or embedding is applied
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModelDecl {
    pub name: String,
    pub kind: ModelKind,
    pub doc: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub mixins: Vec<String>,
    pub embeds: Vec<String>,
}

impl ModelDecl {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn new_mixin(name: &str) -> Self {
        Self {
            kind: ModelKind::Mixin,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Apply `mixin` after every mixin added so far.
    #[must_use]
    pub fn mixin(mut self, mixin: &str) -> Self {
        self.mixins.push(mixin.to_string());
        self
    }

    #[must_use]
    pub fn embed(mut self, model: &str) -> Self {
        self.embeds.push(model.to_string());
        self
    }

    #[must_use]
    pub const fn is_mixin(&self) -> bool {
        matches!(self.kind, ModelKind::Mixin)
    }
}
