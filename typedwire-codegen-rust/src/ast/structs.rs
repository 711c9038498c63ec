//! Rust struct builder.

use typedwire_codegen::builder::{CodeFragment, Renderable};

/// A field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Builder for Rust structs with named fields.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derives(mut self, derives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.derives.extend(derives.into_iter().map(Into::into));
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    fn fields_to_fragments(&self) -> Vec<CodeFragment> {
        self.fields
            .iter()
            .flat_map(|field| {
                let mut fragments = Vec::new();
                if let Some(doc) = &field.doc {
                    fragments.push(CodeFragment::doc(doc));
                }
                fragments.push(CodeFragment::line(format!(
                    "pub {}: {},",
                    field.name, field.ty
                )));
                fragments
            })
            .collect()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }

        if !self.derives.is_empty() {
            fragments.push(CodeFragment::line(format!(
                "#[derive({})]",
                self.derives.join(", ")
            )));
        }

        if self.fields.is_empty() {
            fragments.push(CodeFragment::line(format!("pub struct {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::braced(
                format!("pub struct {} {{", self.name),
                self.fields_to_fragments(),
            ));
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use typedwire_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_empty_struct() {
        let s = CodeBuilder::render(&Struct::new("Empty"));
        assert_eq!(s, "pub struct Empty {}\n");
    }

    #[test]
    fn test_struct_with_field() {
        let s = CodeBuilder::render(
            &Struct::new("GatewayTyped")
                .doc("Envelope.")
                .derives(["Debug", "Default"])
                .field(Field::new("gateway", "Option<Gateway>").doc("The wrapped value.")),
        );
        assert_eq!(
            s,
            "/// Envelope.\n#[derive(Debug, Default)]\npub struct GatewayTyped {\n    /// The wrapped value.\n    pub gateway: Option<Gateway>,\n}\n"
        );
    }
}
