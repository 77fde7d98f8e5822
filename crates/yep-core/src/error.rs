use crate::{ThisError, models::ValueError};

///
/// RuntimeError
/// misuse of a record collection; the panicking accessors report these as panics
///

#[derive(Debug, ThisError)]
pub enum RuntimeError {
    #[error("record collection is not bound to an environment")]
    Detached,

    #[error("model '{0}' is not registered")]
    UnknownModel(String),

    #[error("model '{model}' has no field '{field}'")]
    UnknownField { model: String, field: String },

    #[error("model '{model}' has no method '{method}'")]
    UnknownMethod { model: String, method: String },

    #[error("method '{model}.{method}' has no implementation")]
    MissingImplementation { model: String, method: String },

    #[error("field '{model}.{field}' is read-only")]
    ReadOnlyField { model: String, field: String },

    #[error("method '{model}.{method}' expects {expected} argument(s), got {found}")]
    ArgumentCount {
        model: String,
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("cannot combine records of '{left}' and '{right}'")]
    ModelMismatch { left: String, right: String },

    #[error("field '{model}.{field}' expects records of '{expected}', got '{found}'")]
    RelationTarget {
        model: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("field '{model}.{field}' holds a single record, got {count}")]
    SingleRelation {
        model: String,
        field: String,
        count: usize,
    },

    #[error("field '{model}.{field}': {source}")]
    Value {
        model: String,
        field: String,
        source: ValueError,
    },
}
