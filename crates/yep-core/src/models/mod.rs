mod collection;
mod condition;
mod environment;
mod name;
mod store;
mod value;
mod values;

pub use collection::*;
pub use condition::*;
pub use environment::*;
pub use name::*;
pub use value::*;
pub use values::*;
