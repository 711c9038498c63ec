//! Import collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Modules keep insertion order until [`ImportCollector::sort`] is called;
/// symbols within a module are always sorted.
///
/// ```
/// use typedwire_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("typedwire_runtime", "Tagged");
/// imports.add("typedwire_runtime", "Error");
/// imports.add("serde", "Serialize");
/// imports.sort();
///
/// let modules: Vec<&str> = imports.iter().map(|(m, _)| m).collect();
/// assert_eq!(modules, ["serde", "typedwire_runtime"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Order modules by path.
    pub fn sort(&mut self) {
        self.imports.sort_keys();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
