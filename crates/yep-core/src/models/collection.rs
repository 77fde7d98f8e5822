use crate::{
    RuntimeError,
    models::{
        Condition, Environment, FieldName, Operator, RecordData, Value, ValueError, Values,
        store::Stored,
    },
};
use std::collections::BTreeSet;
use yep_schema::{
    ID_FIELD,
    registry::{Origin, ResolvedField, ResolvedModel},
    types::{Primitive, RelationKind, TypeRef},
};

///
/// RecordCollection
///
/// An ordered set of record ids of one model, bound to an environment.
/// Collections obtained from a pool or a search remember their query so that
/// `load` can re-evaluate it; the default collection is detached and empty.
///
/// The plain accessors panic on misuse (unknown field, read-only field,
/// detached collection). Each has a `try_` form returning `RuntimeError`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordCollection {
    env: Option<Environment>,
    model: String,
    ids: Vec<i64>,
    query: Option<Condition>,
}

impl RecordCollection {
    pub(crate) fn pool(env: Environment, model: &str) -> Self {
        Self {
            env: Some(env),
            model: model.to_string(),
            ids: Vec::new(),
            query: Some(Condition::new()),
        }
    }

    pub(crate) fn bound(env: Environment, model: &str, ids: Vec<i64>) -> Self {
        Self {
            env: Some(env),
            model: model.to_string(),
            ids,
            query: None,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Id of the first record, 0 when empty.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.ids.first().copied().unwrap_or_default()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// One singleton collection per record.
    #[must_use]
    pub fn records(&self) -> Vec<Self> {
        self.ids
            .iter()
            .map(|id| Self {
                env: self.env.clone(),
                model: self.model.clone(),
                ids: vec![*id],
                query: None,
            })
            .collect()
    }

    // -------------------------
    // Set operations
    // -------------------------

    /// # Panics
    ///
    /// Panics when both collections are non-empty and of different models.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        or_panic(self.try_union(other))
    }

    pub fn try_union(&self, other: &Self) -> Result<Self, RuntimeError> {
        if self.model != other.model {
            if self.env.is_none() && self.is_empty() {
                return Ok(other.clone());
            }
            if other.env.is_none() && other.is_empty() {
                return Ok(self.clone());
            }

            return Err(RuntimeError::ModelMismatch {
                left: self.model.clone(),
                right: other.model.clone(),
            });
        }

        let ids: BTreeSet<i64> = self.ids.iter().chain(&other.ids).copied().collect();

        Ok(Self {
            env: self.env.clone().or_else(|| other.env.clone()),
            model: self.model.clone(),
            ids: ids.into_iter().collect(),
            query: None,
        })
    }

    // -------------------------
    // Create, write, unlink
    // -------------------------

    /// # Panics
    ///
    /// Panics when a value names an unknown field or does not fit its field.
    #[must_use]
    pub fn create(&self, values: Values) -> Self {
        or_panic(self.try_create(values))
    }

    /// Insert one record and return it.
    ///
    /// Every value is checked before anything is stored. Read-only fields are
    /// ignored, own fields are written before embedded ones, and embedded
    /// records are created for every embedding that was not linked explicitly.
    pub fn try_create(&self, values: Values) -> Result<Self, RuntimeError> {
        let (env, model) = self.env_model()?;

        let mut own = Vec::new();
        let mut embedded = Vec::new();
        for (name, value) in values {
            let field = field_of(model, &name)?;
            if field.readonly {
                continue;
            }
            check_write(model, field, &value)?;

            if field.origin.is_embedded() {
                if !value.is_zero() {
                    embedded.push((field, value));
                }
            } else if !(is_one2many(field) && value.is_zero()) {
                own.push((field, value));
            }
        }

        let id = env.store_mut().insert(&model.name);
        for (field, value) in own {
            write_field(env, model, id, field, value)?;
        }
        link_embedded(env, model, id)?;
        for (field, value) in embedded {
            write_field(env, model, id, field, value)?;
        }

        tracing::debug!(model = %model.name, id, "record created");

        Ok(Self::bound(env.clone(), &model.name, vec![id]))
    }

    /// # Panics
    ///
    /// Panics on unknown fields, listed read-only fields or ill-typed values.
    pub fn write(&self, values: Values, fields: &[FieldName]) {
        or_panic(self.try_write(values, fields));
    }

    /// Update every record.
    ///
    /// With no `fields`, every non-zero value is written and read-only fields
    /// are skipped. Otherwise exactly the listed fields are written, zero
    /// values included, and listing a read-only field is an error.
    pub fn try_write(&self, mut values: Values, fields: &[FieldName]) -> Result<(), RuntimeError> {
        let (env, model) = self.env_model()?;

        let mut pending = Vec::new();
        if fields.is_empty() {
            for (name, value) in values {
                let field = field_of(model, &name)?;
                if field.readonly || value.is_zero() {
                    continue;
                }
                check_write(model, field, &value)?;
                pending.push((field, value));
            }
        } else {
            for name in fields {
                let field = writable_field(model, name.as_str())?;
                let value = values.take(name);
                check_write(model, field, &value)?;
                pending.push((field, value));
            }
        }

        for id in &self.ids {
            for (field, value) in &pending {
                write_field(env, model, *id, field, value.clone())?;
            }
        }

        Ok(())
    }

    /// # Panics
    ///
    /// Panics when the collection is detached.
    pub fn unlink(&self) -> usize {
        or_panic(self.try_unlink())
    }

    /// Delete every record, returning how many existed.
    pub fn try_unlink(&self) -> Result<usize, RuntimeError> {
        let (env, model) = self.env_model()?;
        let removed = env.store_mut().remove(&model.name, &self.ids);

        tracing::debug!(model = %model.name, removed, "records unlinked");

        Ok(removed)
    }

    // -------------------------
    // Search
    // -------------------------

    /// # Panics
    ///
    /// Panics when the condition names an unknown field.
    #[must_use]
    pub fn search(&self, condition: Condition) -> Self {
        or_panic(self.try_search(condition))
    }

    /// Records of this collection matching `condition`.
    ///
    /// The search runs immediately; the combined query is kept for `load`.
    pub fn try_search(&self, condition: Condition) -> Result<Self, RuntimeError> {
        let (env, model) = self.env_model()?;

        let query = match &self.query {
            Some(query) => query.clone().and_cond(condition),
            None => Condition::new()
                .and(ID_FIELD, Operator::In, self.ids.clone())
                .and_cond(condition),
        };
        let ids = evaluate(env, model, &query)?;

        tracing::trace!(model = %model.name, found = ids.len(), "search");

        Ok(Self {
            env: Some(env.clone()),
            model: model.name.clone(),
            ids,
            query: Some(query),
        })
    }

    /// Shorthand for a search on a single predicate.
    #[must_use]
    pub fn filter(
        &self,
        field: impl AsRef<str>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.search(Condition::new().and(field, operator, value))
    }

    /// # Panics
    ///
    /// Panics when the collection is detached.
    #[must_use]
    pub fn load(&self) -> Self {
        or_panic(self.try_load())
    }

    /// Re-run the query, or drop ids whose records no longer exist.
    pub fn try_load(&self) -> Result<Self, RuntimeError> {
        let (env, model) = self.env_model()?;

        let ids = match &self.query {
            Some(query) => evaluate(env, model, query)?,
            None => {
                let store = env.store();
                self.ids
                    .iter()
                    .copied()
                    .filter(|id| store.contains(&model.name, *id))
                    .collect()
            }
        };

        Ok(Self {
            ids,
            ..self.clone()
        })
    }

    // -------------------------
    // Field access
    // -------------------------

    /// # Panics
    ///
    /// Panics when the field is unknown.
    #[must_use]
    pub fn get(&self, field: impl AsRef<str>) -> Value {
        or_panic(self.try_get(field))
    }

    /// Value of a field on the first record.
    ///
    /// An empty collection reads the field's zero value; relations read as an
    /// empty collection of their target model.
    pub fn try_get(&self, field: impl AsRef<str>) -> Result<Value, RuntimeError> {
        if self.env.is_none() && self.is_empty() {
            return Ok(Value::Null);
        }

        let (env, model) = self.env_model()?;
        let field = field_of(model, field.as_ref())?;

        match self.ids.first() {
            Some(id) => read_field(env, model, *id, field),
            None => empty_value(env, model, field),
        }
    }

    /// # Panics
    ///
    /// Panics when the field is unknown, read-only or the value does not fit.
    pub fn set(&self, field: impl AsRef<str>, value: Value) {
        or_panic(self.try_set(field, value));
    }

    /// Set a field on every record; a no-op on an empty collection.
    pub fn try_set(&self, field: impl AsRef<str>, value: Value) -> Result<(), RuntimeError> {
        if self.is_empty() {
            return Ok(());
        }

        let (env, model) = self.env_model()?;
        let field = writable_field(model, field.as_ref())?;
        check_write(model, field, &value)?;

        for id in &self.ids {
            write_field(env, model, *id, field, value.clone())?;
        }

        Ok(())
    }

    /// # Panics
    ///
    /// Panics when the collection is detached.
    #[must_use]
    pub fn first<T: RecordData>(&self) -> T {
        or_panic(self.try_first())
    }

    /// Data of the first record, or the default when empty.
    pub fn try_first<T: RecordData>(&self) -> Result<T, RuntimeError> {
        match self.ids.first() {
            Some(id) => self.read_record(*id).map(T::from_values),
            None => Ok(T::default()),
        }
    }

    /// # Panics
    ///
    /// Panics when the collection is detached.
    #[must_use]
    pub fn all<T: RecordData>(&self) -> Vec<T> {
        or_panic(self.try_all())
    }

    pub fn try_all<T: RecordData>(&self) -> Result<Vec<T>, RuntimeError> {
        self.ids
            .iter()
            .map(|id| self.read_record(*id).map(T::from_values))
            .collect()
    }

    fn read_record(&self, id: i64) -> Result<Values, RuntimeError> {
        let (env, model) = self.env_model()?;

        model
            .fields
            .iter()
            .map(|field| Ok((field.name.as_str(), read_field(env, model, id, field)?)))
            .collect()
    }

    // -------------------------
    // Methods
    // -------------------------

    /// # Panics
    ///
    /// Panics when the method is unknown, has no implementation, or gets the
    /// wrong number of arguments.
    pub fn call(&self, method: &str, args: impl IntoIterator<Item = Value>) -> Value {
        or_panic(self.try_call(method, args))
    }

    /// Run a method on these records.
    ///
    /// Embedded methods run on the linked records of the embedded model.
    /// Otherwise the implementation is taken from the first of: this model,
    /// the model declaring the method, the applied mixins from the most recent,
    /// and the framework.
    pub fn try_call(
        &self,
        method: &str,
        args: impl IntoIterator<Item = Value>,
    ) -> Result<Value, RuntimeError> {
        let (env, model) = self.env_model()?;
        let args: Vec<Value> = args.into_iter().collect();

        let resolved = model
            .method(method)
            .ok_or_else(|| RuntimeError::UnknownMethod {
                model: model.name.clone(),
                method: method.to_string(),
            })?;

        let expected = resolved.signature.params.len();
        if args.len() != expected {
            return Err(RuntimeError::ArgumentCount {
                model: model.name.clone(),
                method: method.to_string(),
                expected,
                found: args.len(),
            });
        }

        if let Origin::Embedded { model: target, via } = &resolved.origin {
            let ids: BTreeSet<i64> = self
                .ids
                .iter()
                .flat_map(|id| env.store().linked(&model.name, *id, via))
                .collect();

            return Self::bound(env.clone(), target, ids.into_iter().collect())
                .try_call(method, args);
        }

        let implementation = std::iter::once(model.name.as_str())
            .chain(std::iter::once(resolved.declared_by.as_str()))
            .chain(model.mixins.iter().rev().map(String::as_str))
            .chain(std::iter::once(""))
            .find_map(|owner| env.methods().get(owner, method))
            .ok_or_else(|| RuntimeError::MissingImplementation {
                model: model.name.clone(),
                method: method.to_string(),
            })?;

        Ok(implementation(self, args))
    }

    fn env_model(&self) -> Result<(&Environment, &ResolvedModel), RuntimeError> {
        let env = self.env.as_ref().ok_or(RuntimeError::Detached)?;
        let model = env.model(&self.model)?;

        Ok((env, model))
    }
}

fn or_panic<T>(result: Result<T, RuntimeError>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}

// -------------------------
// Field helpers
// -------------------------

fn field_of<'a>(model: &'a ResolvedModel, name: &str) -> Result<&'a ResolvedField, RuntimeError> {
    model
        .field(name)
        .ok_or_else(|| RuntimeError::UnknownField {
            model: model.name.clone(),
            field: name.to_string(),
        })
}

fn writable_field<'a>(
    model: &'a ResolvedModel,
    name: &str,
) -> Result<&'a ResolvedField, RuntimeError> {
    let field = field_of(model, name)?;
    if field.readonly {
        return Err(RuntimeError::ReadOnlyField {
            model: model.name.clone(),
            field: name.to_string(),
        });
    }

    Ok(field)
}

fn is_one2many(field: &ResolvedField) -> bool {
    field
        .relation
        .as_ref()
        .is_some_and(|r| r.kind == RelationKind::One2Many)
}

// check_write
// everything that can fail about a write is checked here, before the store changes
fn check_write(
    model: &ResolvedModel,
    field: &ResolvedField,
    value: &Value,
) -> Result<(), RuntimeError> {
    let value_error = |source| RuntimeError::Value {
        model: model.name.clone(),
        field: field.name.clone(),
        source,
    };

    let Some(relation) = &field.relation else {
        return check_scalar(&field.ty, value).map_err(value_error);
    };

    if let Value::Collection(records) = value
        && !records.model.is_empty()
        && records.model != relation.target
    {
        return Err(RuntimeError::RelationTarget {
            model: model.name.clone(),
            field: field.name.clone(),
            expected: relation.target.clone(),
            found: records.model.clone(),
        });
    }

    let ids = value.ids().ok_or_else(|| {
        value_error(ValueError::Mismatch {
            expected: "record ids",
            found: value.kind(),
        })
    })?;
    if relation.kind.is_single() && ids.len() > 1 {
        return Err(RuntimeError::SingleRelation {
            model: model.name.clone(),
            field: field.name.clone(),
            count: ids.len(),
        });
    }

    Ok(())
}

fn check_scalar(ty: &TypeRef, value: &Value) -> Result<(), ValueError> {
    let expected = match (ty, value) {
        (_, Value::Null) => return Ok(()),
        (TypeRef::Option(inner) | TypeRef::Boxed(inner), value) => {
            return check_scalar(inner, value);
        }
        (TypeRef::Primitive(Primitive::Bool), Value::Bool(_))
        | (
            TypeRef::Primitive(
                Primitive::Int32 | Primitive::Int64 | Primitive::Nat32 | Primitive::Nat64,
            ),
            Value::Int(_),
        )
        | (TypeRef::Primitive(Primitive::Nat64), Value::Nat(_))
        | (
            TypeRef::Primitive(Primitive::Float32 | Primitive::Float64),
            Value::Int(_) | Value::Nat(_) | Value::Float(_),
        )
        | (TypeRef::Primitive(Primitive::Text), Value::Text(_))
        | (TypeRef::Vec(_), Value::List(_)) => return Ok(()),
        (TypeRef::Primitive(p), _) => p.rust_type(),
        (TypeRef::Vec(_), _) => "list",
        _ => return Ok(()),
    };

    Err(ValueError::Mismatch {
        expected,
        found: value.kind(),
    })
}

fn zero_value(ty: &TypeRef) -> Value {
    match ty {
        TypeRef::Primitive(Primitive::Bool) => Value::Bool(false),
        TypeRef::Primitive(Primitive::Float32 | Primitive::Float64) => Value::Float(0.0),
        TypeRef::Primitive(Primitive::Text) => Value::Text(String::new()),
        TypeRef::Primitive(_) => Value::Int(0),
        TypeRef::Boxed(inner) => zero_value(inner),
        TypeRef::Vec(_) => Value::List(Vec::new()),
        TypeRef::RecordSet { .. } => Value::Collection(RecordCollection::default()),
        TypeRef::Option(_) | TypeRef::Named { .. } => Value::Null,
    }
}

fn empty_value(
    env: &Environment,
    model: &ResolvedModel,
    field: &ResolvedField,
) -> Result<Value, RuntimeError> {
    if let Origin::Embedded { model: target, .. } = &field.origin {
        let target = env.model(target)?;
        return empty_value(env, target, field_of(target, &field.name)?);
    }

    Ok(match &field.relation {
        Some(relation) => Value::Collection(RecordCollection::bound(
            env.clone(),
            &relation.target,
            Vec::new(),
        )),
        None => zero_value(&field.ty),
    })
}

fn read_field(
    env: &Environment,
    model: &ResolvedModel,
    id: i64,
    field: &ResolvedField,
) -> Result<Value, RuntimeError> {
    if field.origin.is_framework() && field.name == ID_FIELD {
        return Ok(Value::Int(id));
    }

    if let Origin::Embedded { model: target, via } = &field.origin {
        let linked = env.store().linked(&model.name, id, via);
        let target = env.model(target)?;
        let inner = field_of(target, &field.name)?;

        return match linked.first() {
            Some(child) => read_field(env, target, *child, inner),
            None => empty_value(env, target, inner),
        };
    }

    let Some(relation) = &field.relation else {
        let stored = env.store().stored(&model.name, id, &field.name).cloned();

        return Ok(match stored {
            Some(Stored::Value(value)) if value != Value::Null => value,
            _ => zero_value(&field.ty),
        });
    };

    let ids = if relation.kind == RelationKind::One2Many {
        let reverse = relation.reverse.as_deref().unwrap_or_default();
        env.store().referencing(&relation.target, reverse, id)
    } else {
        env.store().linked(&model.name, id, &field.name)
    };

    Ok(Value::Collection(RecordCollection::bound(
        env.clone(),
        &relation.target,
        ids,
    )))
}

fn write_field(
    env: &Environment,
    model: &ResolvedModel,
    id: i64,
    field: &ResolvedField,
    value: Value,
) -> Result<(), RuntimeError> {
    if let Origin::Embedded { model: target, via } = &field.origin {
        let target = env.model(target)?;
        let child = embedded_row(env, model, id, via, target)?;

        return write_field(env, target, child, field_of(target, &field.name)?, value);
    }

    let Some(relation) = &field.relation else {
        env.store_mut()
            .set(&model.name, id, &field.name, Stored::Value(value));
        return Ok(());
    };

    let ids = value.ids().unwrap_or_default();
    let mut store = env.store_mut();

    if relation.kind == RelationKind::One2Many {
        let reverse = relation.reverse.as_deref().unwrap_or_default();
        let back = |ids: Vec<i64>| Stored::Ids {
            model: model.name.clone(),
            ids,
        };

        for old in store.referencing(&relation.target, reverse, id) {
            if !ids.contains(&old) {
                store.set(&relation.target, old, reverse, back(Vec::new()));
            }
        }
        for new in ids {
            store.set(&relation.target, new, reverse, back(vec![id]));
        }
    } else {
        store.set(
            &model.name,
            id,
            &field.name,
            Stored::Ids {
                model: relation.target.clone(),
                ids,
            },
        );
    }

    Ok(())
}

// embedded_row
// the linked record of an embedding, created on first use
fn embedded_row(
    env: &Environment,
    model: &ResolvedModel,
    id: i64,
    via: &str,
    target: &ResolvedModel,
) -> Result<i64, RuntimeError> {
    if let Some(child) = env.store().linked(&model.name, id, via).first() {
        return Ok(*child);
    }

    let child = env.store_mut().insert(&target.name);
    link_embedded(env, target, child)?;
    env.store_mut().set(
        &model.name,
        id,
        via,
        Stored::Ids {
            model: target.name.clone(),
            ids: vec![child],
        },
    );

    Ok(child)
}

fn link_embedded(env: &Environment, model: &ResolvedModel, id: i64) -> Result<(), RuntimeError> {
    for embed in &model.embeds {
        let target = env.model(embed)?;
        embedded_row(env, model, id, embed, target)?;
    }

    Ok(())
}

fn evaluate(
    env: &Environment,
    model: &ResolvedModel,
    query: &Condition,
) -> Result<Vec<i64>, RuntimeError> {
    for name in query.fields() {
        field_of(model, name)?;
    }

    let ids = env.store().ids(&model.name);
    let mut matched = Vec::new();
    for id in ids {
        let keep = query.evaluate(&mut |name| read_field(env, model, id, field_of(model, name)?))?;
        if keep {
            matched.push(id);
        }
    }

    Ok(matched)
}
