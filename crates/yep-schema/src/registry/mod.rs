mod resolved;

pub use resolved::*;

use crate::{
    Error,
    build::bootstrap,
    node::{MethodDecl, ModelDecl},
};
use std::collections::BTreeMap;

///
/// Describe
/// implemented by every model type so the registry can be built without reflection
///

pub trait Describe {
    fn describe() -> ModelDecl;
}

///
/// Declarations
/// the raw, unresolved set of models handed to bootstrap
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Declarations {
    pub models: Vec<ModelDecl>,

    /// Mixins applied to every model before its declared mixins.
    pub common_mixins: Vec<String>,

    /// Methods every model carries, keyed under the framework in the doc side channel.
    pub framework_methods: Vec<MethodDecl>,
}

impl Declarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn model<T: Describe>(self) -> Self {
        self.declare(T::describe())
    }

    #[must_use]
    pub fn declare(mut self, decl: ModelDecl) -> Self {
        self.register(decl);
        self
    }

    pub fn register(&mut self, decl: ModelDecl) {
        self.models.push(decl);
    }

    #[must_use]
    pub fn common_mixin(mut self, name: &str) -> Self {
        self.common_mixins.push(name.to_string());
        self
    }

    #[must_use]
    pub fn framework_method(mut self, method: MethodDecl) -> Self {
        self.framework_methods.push(method);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelDecl> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn bootstrap(&self) -> Result<ModelRegistry, Error> {
        bootstrap(self)
    }
}

///
/// ModelRegistry
/// frozen after bootstrap; share it behind an `Arc`
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ModelRegistry {
    models: BTreeMap<String, ResolvedModel>,
}

impl ModelRegistry {
    pub(crate) const fn new(models: BTreeMap<String, ResolvedModel>) -> Self {
        Self { models }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedModel> {
        self.models.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Every composed model, mixins included, ordered by name.
    pub fn models(&self) -> impl Iterator<Item = &ResolvedModel> {
        self.models.values()
    }

    /// Models that get a generated pool file.
    pub fn concrete_models(&self) -> impl Iterator<Item = &ResolvedModel> {
        self.models.values().filter(|m| !m.is_mixin())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
