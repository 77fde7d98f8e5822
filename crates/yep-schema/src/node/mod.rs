mod field;
mod method;
mod model;

pub use field::*;
pub use method::*;
pub use model::*;
