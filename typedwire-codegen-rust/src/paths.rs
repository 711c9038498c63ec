//! Path resolution for generated code.

use std::collections::{BTreeMap, BTreeSet};

use typedwire_codegen::generation::ImportCollector;

/// Prelude names the generated code writes bare; never hoisted.
const PRELUDE: &[&str] = &[
    "Result", "Option", "Some", "None", "Ok", "Err", "From", "Into", "Default",
];

/// How generated code refers to items outside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStyle {
    /// Absolute paths everywhere; the text can be `include!`d into any module.
    #[default]
    Qualified,
    /// `use` lines at the top of the file and short names in the body.
    Hoisted,
}

/// Resolves runtime, serde and variant paths for one output file.
///
/// In hoisted mode a short name is used only while it is unambiguous: names
/// defined by the file itself, or already imported from another module,
/// fall back to the full path.
#[derive(Debug)]
pub(crate) struct Paths {
    style: ImportStyle,
    imports: ImportCollector,
    local: BTreeSet<String>,
    claimed: BTreeMap<String, String>,
}

impl Paths {
    pub(crate) fn new(style: ImportStyle) -> Self {
        Self {
            style,
            imports: ImportCollector::new(),
            local: BTreeSet::new(),
            claimed: BTreeMap::new(),
        }
    }

    /// Reserve a name defined in (or resolved relative to) the output file.
    pub(crate) fn reserve(&mut self, name: &str) {
        self.local.insert(name.to_string());
    }

    /// An item of the runtime crate, e.g. `Tagged`.
    pub(crate) fn runtime(&mut self, runtime: &str, item: &str) -> String {
        self.item(runtime, item)
    }

    /// A serde item re-exported by the runtime crate, e.g. `Serialize`.
    pub(crate) fn serde(&mut self, runtime: &str, item: &str) -> String {
        self.item(&format!("{}::serde", runtime), item)
    }

    /// `Result`: the bare prelude name in hoisted files unless the file
    /// defines its own `Result`, the absolute path otherwise.
    pub(crate) fn result(&self) -> &'static str {
        match self.style {
            ImportStyle::Hoisted if !self.local.contains("Result") => "Result",
            _ => "::core::result::Result",
        }
    }

    /// A variant type path as written in the request.
    pub(crate) fn type_path(&mut self, path: &str) -> String {
        match path.rsplit_once("::") {
            Some((module, name)) if !module.is_empty() => self.item_as_written(module, name, path),
            _ => path.to_string(),
        }
    }

    pub(crate) fn into_imports(self) -> ImportCollector {
        let mut imports = self.imports;
        imports.sort();
        imports
    }

    fn item(&mut self, module: &str, name: &str) -> String {
        let full = format!("{}::{}", absolute(module), name);
        self.item_as_written(module, name, &full)
    }

    fn item_as_written(&mut self, module: &str, name: &str, full: &str) -> String {
        if self.style == ImportStyle::Qualified
            || self.local.contains(name)
            || PRELUDE.contains(&name)
        {
            return full.to_string();
        }

        match self.claimed.get(name) {
            Some(owner) if owner != module => full.to_string(),
            Some(_) => name.to_string(),
            None => {
                self.claimed.insert(name.to_string(), module.to_string());
                self.imports.add(module, name);
                name.to_string()
            }
        }
    }
}

/// Turn a crate path into one that resolves from any module.
fn absolute(path: &str) -> String {
    let first = path.split("::").next().unwrap_or_default();
    if path.starts_with("::") || matches!(first, "crate" | "self" | "super") {
        path.to_string()
    } else {
        format!("::{}", path)
    }
}
