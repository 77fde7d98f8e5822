//! yep: declare business models, compose them through mixins and embedding,
//! and generate a typed recordset pool over the generic runtime.
//!
//! Generated pool files import this crate's `models` module.

pub use yep_build as build;
pub use yep_core::{RuntimeError, action, models};
pub use yep_macros::method;
pub use yep_schema as schema;

///
/// Prelude
///

pub mod prelude {
    pub use crate::method;
    pub use yep_core::prelude::*;
    pub use yep_schema::prelude::*;
}
