// Output generation module

pub mod mse;

pub use mse::{attributes, render, MseWriter};
