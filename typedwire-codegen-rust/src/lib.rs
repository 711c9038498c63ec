//! Rust code generation for typedwire envelopes.
//!
//! [`Generator`] turns validated
//! [`GenerationRequest`](typedwire_request::GenerationRequest)s into the
//! text of a Rust file. The generated code depends on the
//! `typedwire-runtime` crate.

mod envelope;
mod generator;
mod naming;
mod paths;
mod rust_file;

pub mod ast;

pub use envelope::SynthesizedAdapter;
pub use generator::Generator;
pub use naming::{field_name, safe_name};
pub use paths::ImportStyle;
pub use rust_file::{RustFile, Use, render_imports};
