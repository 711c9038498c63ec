//! Rust naming for generated items.

use typedwire_core::{is_rust_keyword, to_snake_case};

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Make an identifier usable in generated code, e.g. `type` -> `r#type`.
pub fn safe_name(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else if is_rust_keyword(name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Field of the envelope that holds the capability value.
pub fn field_name(capability: &str) -> String {
    safe_name(&to_snake_case(capability))
}

/// A Rust string literal for `value`.
pub fn string_literal(value: &str) -> String {
    format!("{:?}", value)
}
