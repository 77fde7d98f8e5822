use crate::{
    RuntimeError,
    models::{RecordCollection, RecordSet, Value, store::MemoryStore},
};
use std::{
    cell::{Ref, RefCell, RefMut},
    collections::BTreeMap,
    fmt,
    rc::Rc,
    sync::Arc,
};
use yep_schema::registry::{ModelRegistry, ResolvedModel};

///
/// MethodFn
/// a method implementation, receiving the records it was called on
///

pub type MethodFn = Rc<dyn Fn(&RecordCollection, Vec<Value>) -> Value>;

///
/// MethodTable
/// implementations keyed by (model, method); an empty model is framework-wide
///

#[derive(Clone, Default)]
pub struct MethodTable {
    methods: BTreeMap<(String, String), MethodFn>,
}

impl MethodTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn define(
        mut self,
        model: impl AsRef<str>,
        method: &str,
        f: impl Fn(&RecordCollection, Vec<Value>) -> Value + 'static,
    ) -> Self {
        self.methods.insert(
            (model.as_ref().to_string(), method.to_string()),
            Rc::new(f),
        );
        self
    }

    #[must_use]
    pub fn define_framework(
        self,
        method: &str,
        f: impl Fn(&RecordCollection, Vec<Value>) -> Value + 'static,
    ) -> Self {
        self.define("", method, f)
    }

    #[must_use]
    pub fn get(&self, model: &str, method: &str) -> Option<MethodFn> {
        self.methods
            .get(&(model.to_string(), method.to_string()))
            .cloned()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.methods.keys().map(|(model, method)| format!("{model}.{method}")))
            .finish()
    }
}

///
/// Environment
/// the registry, method implementations and record storage collections are bound to
///

#[derive(Clone)]
pub struct Environment {
    inner: Rc<EnvInner>,
}

struct EnvInner {
    registry: Arc<ModelRegistry>,
    methods: MethodTable,
    store: RefCell<MemoryStore>,
}

impl Environment {
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>, methods: MethodTable) -> Self {
        tracing::debug!(models = registry.len(), "environment created");

        Self {
            inner: Rc::new(EnvInner {
                registry,
                methods,
                store: RefCell::new(MemoryStore::default()),
            }),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.inner.registry
    }

    #[must_use]
    pub fn methods(&self) -> &MethodTable {
        &self.inner.methods
    }

    /// Resolved model, if it is registered and concrete.
    pub fn model(&self, name: &str) -> Result<&ResolvedModel, RuntimeError> {
        self.registry()
            .get(name)
            .filter(|m| !m.is_mixin())
            .ok_or_else(|| RuntimeError::UnknownModel(name.to_string()))
    }

    /// Every record of `model`; searching it searches the whole table.
    #[must_use]
    pub fn pool(&self, model: impl AsRef<str>) -> RecordCollection {
        RecordCollection::pool(self.clone(), model.as_ref())
    }

    #[must_use]
    pub fn pool_of<T: RecordSet>(&self) -> T {
        T::from_collection(self.pool(T::MODEL))
    }

    // store borrows must never be held across a method call
    pub(crate) fn store(&self) -> Ref<'_, MemoryStore> {
        self.inner.store.borrow()
    }

    pub(crate) fn store_mut(&self) -> RefMut<'_, MemoryStore> {
        self.inner.store.borrow_mut()
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("models", &self.registry().len())
            .field("methods", &self.inner.methods)
            .finish_non_exhaustive()
    }
}
