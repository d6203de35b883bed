// FAMIX model types: interchange values, entities and the node registry

pub mod entity;
pub mod registry;
pub mod value;

pub use entity::*;
pub use registry::*;
pub use value::*;
