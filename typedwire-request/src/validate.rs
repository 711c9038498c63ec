//! Validation utilities for Rust identifiers and type paths

use typedwire_core::is_rust_keyword;

use crate::{Error, Result};

/// Path segments that may only appear at the start of a type path.
const PATH_PREFIXES: &[&str] = &["crate", "super", "self"];

/// Validate that a name is a plain Rust identifier.
///
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn identifier_problem(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if name == "_" {
        return Some("a lone underscore is not an identifier");
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Check a single identifier, e.g. a capability or envelope name.
pub(crate) fn check_identifier(name: &str, context: &str) -> Result<()> {
    if is_rust_keyword(name) {
        return Err(Error::reserved_keyword(name, context));
    }

    if let Some(reason) = identifier_problem(name) {
        return Err(Error::invalid_identifier(name, context, reason));
    }

    Ok(())
}

/// Check a Rust type path such as `UserGateway`, `crate::gw::UserGateway`
/// or `::std::time::Duration`.
///
/// Generic arguments are not accepted.
pub(crate) fn check_type_path(path: &str, context: &str) -> Result<()> {
    let trimmed = path.strip_prefix("::").unwrap_or(path);
    if trimmed.is_empty() {
        return Err(Error::invalid_identifier(path, context, "type path cannot be empty"));
    }

    let segments: Vec<&str> = trimmed.split("::").collect();
    let last = segments.len() - 1;

    for (i, segment) in segments.iter().enumerate() {
        if i < last && is_path_prefix(path, &segments[..=i]) {
            continue;
        }
        if is_rust_keyword(segment) {
            return Err(Error::reserved_keyword(*segment, context));
        }
        if let Some(reason) = identifier_problem(segment) {
            return Err(Error::invalid_identifier(path, context, reason));
        }
    }

    Ok(())
}

/// `crate`, `self` and `super` lead a relative path; `super` may repeat.
fn is_path_prefix(path: &str, leading: &[&str]) -> bool {
    if path.starts_with("::") {
        return false;
    }
    match leading {
        [first] => PATH_PREFIXES.contains(first),
        [first, rest @ ..] => {
            matches!(*first, "self" | "super") && rest.iter().all(|s| *s == "super")
        }
        [] => false,
    }
}

/// Last segment of a type path: `crate::gw::UserGateway` -> `UserGateway`.
pub(crate) fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
