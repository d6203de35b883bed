//! srcml2mse - Convert srcML fact bases into FAMIX models
//!
//! Reads a srcML archive of C, C++ and SWIG sources, builds a FAMIX model
//! (files, includes, classes, members, functions, invocations) and writes
//! it in the MSE interchange format.

pub mod analysis;
pub mod cli;
pub mod compression;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{ConversionStats, Converter, Model};
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Entity, NodeId, Registry};
pub use output::{render, MseWriter};
