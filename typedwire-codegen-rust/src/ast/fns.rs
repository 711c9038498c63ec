//! Rust function builder.

use typedwire_codegen::builder::{CodeFragment, Renderable};

use super::visibility;

/// A parameter in a Rust function.
///
/// An empty type renders the name alone, for receivers like `&self`.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    fn format(&self) -> String {
        if self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

/// Builder for Rust functions and methods.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    is_public: bool,
    generics: Vec<String>,
    params: Vec<Param>,
    return_type: Option<String>,
    where_clauses: Vec<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_public: true,
            generics: Vec::new(),
            params: Vec::new(),
            return_type: None,
            where_clauses: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub(super) fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn generic(mut self, param: impl Into<String>) -> Self {
        self.generics.push(param.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a `where` predicate, e.g. `S: Serializer`.
    pub fn where_clause(mut self, predicate: impl Into<String>) -> Self {
        self.where_clauses.push(predicate.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Append a rendered node, such as a [`Match`](super::Match), to the body.
    pub fn body_node(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    fn signature(&self) -> String {
        let generics = if self.generics.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.generics.join(", "))
        };
        let params = self
            .params
            .iter()
            .map(Param::format)
            .collect::<Vec<_>>()
            .join(", ");
        let ret = match &self.return_type {
            Some(ty) => format!(" -> {}", ty),
            None => String::new(),
        };

        format!(
            "{}fn {}{}({}){}",
            visibility(self.is_public),
            self.name,
            generics,
            params,
            ret
        )
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }

        let signature = self.signature();

        if self.where_clauses.is_empty() {
            if self.body.is_empty() {
                fragments.push(CodeFragment::line(format!("{} {{}}", signature)));
            } else {
                fragments.push(CodeFragment::braced(
                    format!("{} {{", signature),
                    self.body.clone(),
                ));
            }
            return fragments;
        }

        fragments.push(CodeFragment::line(signature));
        fragments.push(CodeFragment::line("where"));
        fragments.push(CodeFragment::indent(
            self.where_clauses
                .iter()
                .map(|clause| CodeFragment::line(format!("{},", clause)))
                .collect(),
        ));
        fragments.push(CodeFragment::braced("{", self.body.clone()));

        fragments
    }
}

#[cfg(test)]
mod tests {
    use typedwire_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_simple_fn() {
        let f = CodeBuilder::render(&Fn::new("greet"));
        assert_eq!(f, "pub fn greet() {}\n");
    }

    #[test]
    fn test_method() {
        let f = CodeBuilder::render(
            &Fn::new("tag")
                .param(Param::new("&self", ""))
                .returns("&'static str")
                .body_line("\"user\""),
        );
        assert_eq!(f, "pub fn tag(&self) -> &'static str {\n    \"user\"\n}\n");
    }

    #[test]
    fn test_where_clause() {
        let f = CodeBuilder::render(
            &Fn::new("serialize")
                .private()
                .generic("S")
                .param(Param::new("&self", ""))
                .param(Param::new("serializer", "S"))
                .returns("Result<S::Ok, S::Error>")
                .where_clause("S: Serializer")
                .body_line("todo()"),
        );
        assert_eq!(
            f,
            "fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>\nwhere\n    S: Serializer,\n{\n    todo()\n}\n"
        );
    }

    #[test]
    fn test_fn_with_doc() {
        let f = CodeBuilder::render(&Fn::new("run").doc("Read the envelope."));
        assert!(f.starts_with("/// Read the envelope.\n"));
    }
}
