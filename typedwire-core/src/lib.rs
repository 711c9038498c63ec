//! Core utilities and types for the typedwire generator.
//!
//! This crate provides the naming helpers and output sinks shared by
//! the request, codegen and CLI crates.

mod file;
mod utils;

// Output sinks
pub use file::{File, OutputTarget, WriteResult};
// String utilities
pub use utils::{is_rust_keyword, to_snake_case};
