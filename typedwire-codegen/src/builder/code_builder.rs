//! Turns code fragments into indented text.

use super::{CodeFragment, Renderable};

/// One indentation level, as rustfmt writes it.
const INDENT: &str = "    ";

/// Accumulates indented lines of generated code.
///
/// ```
/// use typedwire_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let code = CodeBuilder::render(&CodeFragment::braced(
///     "impl Gateway {",
///     vec![CodeFragment::line("pub const NAME: &'static str = \"Gateway\";")],
/// ));
///
/// assert_eq!(
///     code,
///     "impl Gateway {\n    pub const NAME: &'static str = \"Gateway\";\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    depth: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn rust() -> Self {
        Self::default()
    }

    /// Render a node on its own and return the text.
    pub fn render(node: &impl Renderable) -> String {
        let mut builder = Self::rust();
        builder.emit(node);
        builder.build()
    }

    /// Add a line at the current depth.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(&INDENT.repeat(self.depth));
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add an empty line; blank lines never carry indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add a line prefixed with a comment marker such as `///` or `//`.
    pub fn push_comment(&mut self, marker: &str, text: &str) -> &mut Self {
        if text.is_empty() {
            self.push_line(marker)
        } else {
            self.push_line(&format!("{} {}", marker, text))
        }
    }

    /// Emit every fragment of a node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply(fragment);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn apply(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.nested(body);
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::Indent(fragments) => self.nested(fragments),
            CodeFragment::Doc(text) => {
                self.push_comment("///", &text);
            }
        }
    }

    fn nested(&mut self, fragments: Vec<CodeFragment>) {
        self.depth += 1;
        for fragment in fragments {
            self.apply(fragment);
        }
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_body_is_indented() {
        let cases = ["UserGateway", "OrdersGateway"]
            .iter()
            .map(|name| CodeFragment::line(format!("{name}({name}),")))
            .collect();
        let code = CodeBuilder::render(&CodeFragment::braced("pub enum Gateway {", cases));

        assert_eq!(
            code,
            "pub enum Gateway {\n    UserGateway(UserGateway),\n    OrdersGateway(OrdersGateway),\n}\n"
        );
    }

    #[test]
    fn test_blank_lines_carry_no_indent() {
        let code = CodeBuilder::render(&CodeFragment::Indent(vec![
            CodeFragment::line("a"),
            CodeFragment::Blank,
            CodeFragment::line("b"),
        ]));
        assert_eq!(code, "    a\n\n    b\n");
    }

    #[test]
    fn test_indent_resets_after_block() {
        let mut builder = CodeBuilder::rust();
        builder.emit(&CodeFragment::braced("fn f() {", vec![CodeFragment::line("x();")]));
        builder.push_line("y");
        assert_eq!(builder.build(), "fn f() {\n    x();\n}\ny\n");
    }

    #[test]
    fn test_emit_nested_fragments() {
        let fragments = vec![
            CodeFragment::doc("Envelope."),
            CodeFragment::braced(
                "fn read() {",
                vec![
                    CodeFragment::block("match tag {", vec![CodeFragment::line("_ => {}")], Some("};".into())),
                ],
            ),
        ];

        let mut builder = CodeBuilder::rust();
        builder.emit(&fragments);
        assert_eq!(
            builder.build(),
            "/// Envelope.\nfn read() {\n    match tag {\n        _ => {}\n    };\n}\n"
        );
    }

    #[test]
    fn test_empty_doc_line() {
        let code = CodeBuilder::render(&CodeFragment::doc(""));
        assert_eq!(code, "///\n");
    }
}
