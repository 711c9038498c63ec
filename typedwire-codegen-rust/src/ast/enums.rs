//! Rust enum builder.

use typedwire_codegen::builder::{CodeFragment, Renderable};

/// A variant in a Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub data: Option<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
        }
    }

    /// Set tuple data for the variant, e.g., `UserGateway(UserGateway)`.
    pub fn tuple(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    variants: Vec<Variant>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            variants: Vec::new(),
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

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    fn variants_to_fragments(&self) -> Vec<CodeFragment> {
        self.variants
            .iter()
            .map(|variant| {
                CodeFragment::line(match &variant.data {
                    Some(data) => format!("{}({}),", variant.name, data),
                    None => format!("{},", variant.name),
                })
            })
            .collect()
    }
}

impl Renderable for Enum {
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

        if self.variants.is_empty() {
            fragments.push(CodeFragment::line(format!("pub enum {} {{}}", self.name)));
        } else {
            fragments.push(CodeFragment::braced(
                format!("pub enum {} {{", self.name),
                self.variants_to_fragments(),
            ));
        }

        fragments
    }
}
