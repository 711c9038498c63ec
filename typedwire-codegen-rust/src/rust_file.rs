//! Structured Rust file generation: a header, `use` lines and a body.

use typedwire_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ImportCollector,
};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    module: String,
    symbols: Vec<String>,
}

impl Use {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    fn format(&self) -> String {
        match self.symbols.as_slice() {
            [] => format!("use {};", self.module),
            [symbol] => format!("use {}::{};", self.module, symbol),
            symbols => format!("use {}::{{{}}};", self.module, symbols.join(", ")),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.format())]
    }
}

/// Turn collected imports into use statements, one per module.
pub fn render_imports(imports: &ImportCollector) -> Vec<Use> {
    imports
        .iter()
        .map(|(module, symbols)| Use::new(module).symbols(symbols.iter()))
        .collect()
}

/// A structured representation of a Rust file.
///
/// Body items are separated by one blank line.
#[derive(Debug, Default)]
pub struct RustFile {
    header: Vec<String>,
    uses: Vec<Use>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `//` comment line to the file header.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    pub fn use_stmts(mut self, uses: impl IntoIterator<Item = Use>) -> Self {
        self.uses.extend(uses);
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::rust();
        let mut sections = 0;

        if !self.header.is_empty() {
            for line in &self.header {
                builder.push_comment("//", line);
            }
            sections += 1;
        }

        if !self.uses.is_empty() {
            if sections > 0 {
                builder.push_blank();
            }
            for use_stmt in &self.uses {
                builder.emit(use_stmt);
            }
            sections += 1;
        }

        for fragments in &self.body {
            if sections > 0 {
                builder.push_blank();
            }
            builder.emit(fragments);
            sections += 1;
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.uses.is_empty() && self.body.is_empty()
    }
}
