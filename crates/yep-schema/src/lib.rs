//! Model declarations and the bootstrap that composes them into a registry.

pub mod build;
pub mod error;
pub mod node;
pub mod registry;
pub mod types;
pub mod validate;

/// Maximum length for model identifiers.
pub const MAX_MODEL_NAME_LEN: usize = 64;

/// Maximum length for field and method identifiers.
pub const MAX_MEMBER_NAME_LEN: usize = 64;

/// Read-only identifier field the framework adds to every model.
pub const ID_FIELD: &str = "ID";

use crate::build::BuildError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ID_FIELD,
        build::bootstrap,
        err,
        error::ErrorTree,
        node::*,
        registry::{
            Declarations, Describe, Member, ModelRegistry, Origin, ResolvedField, ResolvedMethod,
            ResolvedModel,
        },
        types::{Primitive, RelationKind, TypeRef},
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),
}

impl Error {
    /// The collected validation messages.
    #[must_use]
    pub const fn errors(&self) -> &error::ErrorTree {
        match self {
            Self::BuildError(BuildError::Validation(tree)) => tree,
        }
    }
}
