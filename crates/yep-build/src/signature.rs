use crate::GenerateError;
use std::collections::{BTreeMap, btree_map};
use yep_schema::registry::{ModelRegistry, Origin, ResolvedMethod, ResolvedModel};

///
/// MethodRef
/// an empty model names a framework-global method
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MethodRef {
    pub model: String,
    pub method: String,
}

impl MethodRef {
    #[must_use]
    pub fn new(model: &str, method: &str) -> Self {
        Self {
            model: model.to_string(),
            method: method.to_string(),
        }
    }

    #[must_use]
    pub fn framework(method: &str) -> Self {
        Self::new("", method)
    }
}

///
/// MethodAstData
/// what the implementation source says about a method
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MethodAstData {
    pub params: Vec<String>,
    pub doc: String,
}

///
/// MethodAstMap
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MethodAstMap {
    entries: BTreeMap<MethodRef, MethodAstData>,
}

impl MethodAstMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous one for the same key.
    pub fn insert(&mut self, key: MethodRef, data: MethodAstData) -> Option<MethodAstData> {
        self.entries.insert(key, data)
    }

    #[must_use]
    pub fn get(&self, key: &MethodRef) -> Option<&MethodAstData> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &MethodRef) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, MethodRef, MethodAstData> {
        self.entries.iter()
    }
}

impl FromIterator<(MethodRef, MethodAstData)> for MethodAstMap {
    fn from_iter<I: IntoIterator<Item = (MethodRef, MethodAstData)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Find the source data describing `method` as composed on `model`.
///
/// Tries the exact (model, method) pair, then the model's mixins from the most
/// recently applied to the least, then the framework entry. Embedded methods
/// are looked up on the model they are delegated to.
#[must_use]
pub fn lookup<'a>(
    ast: &'a MethodAstMap,
    registry: &ModelRegistry,
    model: &ResolvedModel,
    method: &ResolvedMethod,
) -> Option<&'a MethodAstData> {
    if let Origin::Embedded { model: target, .. } = &method.origin
        && let Some(target) = registry.get(target)
        && let Some(inner) = target.method(&method.name)
    {
        return lookup(ast, registry, target, inner);
    }

    std::iter::once(model.name.as_str())
        .chain(model.mixins.iter().rev().map(String::as_str))
        .chain(std::iter::once(""))
        .find_map(|owner| ast.get(&MethodRef::new(owner, &method.name)))
}

///
/// AlignedSignature
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AlignedSignature {
    pub params: Vec<String>,
    pub doc: String,
}

/// Pair the recovered parameter names with the declared signature.
///
/// The counts have to match exactly; nothing is padded or truncated.
pub fn align(
    model: &str,
    method: &ResolvedMethod,
    data: Option<&MethodAstData>,
) -> Result<AlignedSignature, GenerateError> {
    let params = data.map(|d| d.params.clone()).unwrap_or_default();
    let expected = method.signature.params.len();

    if params.len() != expected {
        return Err(GenerateError::SignatureMismatch {
            model: model.to_string(),
            method: method.name.clone(),
            expected,
            found: params.len(),
        });
    }

    if let Some(name) = params
        .iter()
        .find(|name| syn::parse_str::<syn::Ident>(name).is_err())
    {
        return Err(GenerateError::InvalidName {
            model: model.to_string(),
            member: method.name.clone(),
            name: name.clone(),
        });
    }

    let doc = match data {
        Some(d) if !d.doc.is_empty() => d.doc.clone(),
        _ => method.doc.clone(),
    };

    Ok(AlignedSignature { params, doc })
}
