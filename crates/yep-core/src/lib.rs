//! Runtime side of yep: the generic record collection generated pools delegate
//! to, and the action registry.

pub mod action;
pub mod error;
pub mod models;

pub use error::RuntimeError;

use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        action::{ActionCollection, ActionError, ActionRef, BaseAction},
        models::{
            Condition, Environment, FieldName, FieldValue, MethodTable, ModelName, Operator,
            RecordCollection, RecordData, RecordSet, Value, Values,
        },
    };
}
