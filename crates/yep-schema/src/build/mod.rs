mod compose;
mod link;

use crate::{
    Error, ThisError,
    error::ErrorTree,
    registry::{Declarations, ModelRegistry},
    validate::validate_declarations,
};
use compose::Composer;
use link::{link_models, link_reverse_fields};

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

/// Resolve every declaration into a frozen registry.
///
/// Runs validation, linking, then mixin and embedding inflation. The result
/// depends only on `decls`, so the generator and the runtime always agree on
/// the composed models.
pub fn bootstrap(decls: &Declarations) -> Result<ModelRegistry, Error> {
    tracing::debug!(models = decls.models.len(), "bootstrapping model registry");

    let mut errs = ErrorTree::new();
    validate_declarations(decls, &mut errs);
    link_models(decls, &mut errs);
    errs.clone().result().map_err(BuildError::Validation)?;

    let models = Composer::new(decls).compose_all(&mut errs);
    link_reverse_fields(&models, &mut errs);
    errs.result().map_err(BuildError::Validation)?;

    tracing::debug!(models = models.len(), "model registry bootstrapped");

    Ok(ModelRegistry::new(models))
}
