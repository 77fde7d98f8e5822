//! A pool generated at build time from `schema`, with the method
//! implementations it dispatches to.

pub mod methods;
pub mod pool;
pub mod schema;

use std::sync::Arc;
use yep::models::Environment;

/// Bootstrap the test models into a fresh in-memory environment.
pub fn environment() -> Result<Environment, yep::schema::Error> {
    let registry = schema::declarations().bootstrap()?;

    Ok(Environment::new(Arc::new(registry), methods::method_table()))
}
