//! Rust impl block builder.

use typedwire_codegen::builder::{CodeFragment, Renderable};

use super::{Fn, visibility};

/// An associated constant, e.g. `pub const NAME: &'static str = "GatewayTyped";`.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    ty: String,
    value: String,
    doc: Option<String>,
    is_public: bool,
}

impl Const {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            value: value.into(),
            doc: None,
            is_public: true,
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
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc));
        }
        fragments.push(CodeFragment::line(format!(
            "{}const {}: {} = {};",
            visibility(self.is_public),
            self.name,
            self.ty,
            self.value
        )));
        fragments
    }
}

/// Builder for Rust impl blocks.
///
/// Items of a trait impl are rendered without visibility.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    generics: Option<String>,
    trait_name: Option<String>,
    consts: Vec<Const>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            generics: None,
            trait_name: None,
            consts: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Generic parameters of the impl itself, e.g. `'de`.
    pub fn generics(mut self, generics: impl Into<String>) -> Self {
        self.generics = Some(generics.into());
        self
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    pub fn constant(mut self, constant: Const) -> Self {
        self.consts.push(constant);
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    fn format_header(&self) -> String {
        let generics = self
            .generics
            .as_ref()
            .map(|g| format!("<{}>", g))
            .unwrap_or_default();
        match &self.trait_name {
            Some(trait_name) => format!("impl{} {} for {}", generics, trait_name, self.type_name),
            None => format!("impl{} {}", generics, self.type_name),
        }
    }

    fn items_to_fragments(&self) -> Vec<CodeFragment> {
        let in_trait = self.trait_name.is_some();
        let mut fragments = Vec::new();

        for constant in &self.consts {
            let constant = if in_trait {
                constant.clone().private()
            } else {
                constant.clone()
            };
            fragments.extend(constant.to_fragments());
        }

        for method in &self.methods {
            if !fragments.is_empty() {
                fragments.push(CodeFragment::Blank);
            }
            let method = if in_trait {
                method.clone().private()
            } else {
                method.clone()
            };
            fragments.extend(method.to_fragments());
        }

        fragments
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let header = self.format_header();
        if self.consts.is_empty() && self.methods.is_empty() {
            return vec![CodeFragment::line(format!("{} {{}}", header))];
        }
        vec![CodeFragment::braced(
            format!("{} {{", header),
            self.items_to_fragments(),
        )]
    }
}

#[cfg(test)]
mod tests {
    use typedwire_codegen::builder::CodeBuilder;

    use super::*;
    use crate::ast::Param;

    #[test]
    fn test_empty_impl() {
        let i = CodeBuilder::render(&Impl::new("Gateway").for_trait("Marker"));
        assert_eq!(i, "impl Marker for Gateway {}\n");
    }

    #[test]
    fn test_trait_impl_drops_visibility() {
        let i = CodeBuilder::render(
            &Impl::new("UserGateway")
                .for_trait("Tagged<Gateway>")
                .constant(Const::new("TAG", "&'static str", "\"user\"")),
        );
        assert_eq!(
            i,
            "impl Tagged<Gateway> for UserGateway {\n    const TAG: &'static str = \"user\";\n}\n"
        );
    }

    #[test]
    fn test_consts_then_methods() {
        let i = CodeBuilder::render(
            &Impl::new("GatewayTyped")
                .constant(Const::new("NAME", "&'static str", "\"GatewayTyped\""))
                .method(Fn::new("a").param(Param::new("&self", "")))
                .method(Fn::new("b")),
        );
        assert_eq!(
            i,
            "impl GatewayTyped {\n    pub const NAME: &'static str = \"GatewayTyped\";\n\n    pub fn a(&self) {}\n\n    pub fn b() {}\n}\n"
        );
    }

    #[test]
    fn test_generic_impl() {
        let i = CodeBuilder::render(
            &Impl::new("GatewayTyped")
                .generics("'de")
                .for_trait("Deserialize<'de>")
                .method(Fn::new("deserialize")),
        );
        assert!(i.starts_with("impl<'de> Deserialize<'de> for GatewayTyped {\n"));
        assert!(i.contains("    fn deserialize() {}\n"));
    }
}
