//! Rust AST builders for generating structs, enums, impls, functions and
//! match expressions.
//!
//! Every node implements [`Renderable`](typedwire_codegen::builder::Renderable)
//! and is turned into text by a `CodeBuilder`.

mod enums;
mod fns;
mod impls;
mod matches;
mod structs;

pub use enums::{Enum, Variant};
pub use fns::{Fn, Param};
pub use impls::{Const, Impl};
pub use matches::{Arm, Match};
pub use structs::{Field, Struct};

/// `pub ` or nothing.
fn visibility(is_public: bool) -> &'static str {
    if is_public { "pub " } else { "" }
}
