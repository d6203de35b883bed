// Parser module for reading srcML fact bases

pub mod scope;
pub mod srcml;

pub use scope::{walk, Frame, ScopeKind, ScopeStack};
pub use srcml::parse_document;
