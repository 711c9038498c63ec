//! Rust match expression builder.

use typedwire_codegen::builder::{CodeFragment, Renderable};

/// A match arm with a single expression body: `pattern => expr,`.
#[derive(Debug, Clone)]
pub struct Arm {
    pattern: String,
    body: String,
}

impl Arm {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            body: "{}".to_string(),
        }
    }

    pub fn body(mut self, expr: impl Into<String>) -> Self {
        self.body = expr.into();
        self
    }
}

impl Renderable for Arm {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(format!("{} => {},", self.pattern, self.body))]
    }
}

/// A match expression, optionally bound with `let`.
///
/// A match with no arms renders as `match x {}`, which is how an empty enum
/// is matched.
#[derive(Debug, Clone)]
pub struct Match {
    scrutinee: String,
    binding: Option<String>,
    arms: Vec<Arm>,
}

impl Match {
    pub fn new(scrutinee: impl Into<String>) -> Self {
        Self {
            scrutinee: scrutinee.into(),
            binding: None,
            arms: Vec::new(),
        }
    }

    /// Render as `let name = match ... { ... };`.
    pub fn bind(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }

    pub fn arm(mut self, arm: Arm) -> Self {
        self.arms.push(arm);
        self
    }
}

impl Renderable for Match {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let (prefix, close) = match &self.binding {
            Some(name) => (format!("let {} = ", name), "};"),
            None => (String::new(), "}"),
        };

        if self.arms.is_empty() {
            return vec![CodeFragment::line(format!(
                "{}match {} {{{}",
                prefix, self.scrutinee, close
            ))];
        }

        vec![CodeFragment::block(
            format!("{}match {} {{", prefix, self.scrutinee),
            self.arms.iter().flat_map(Renderable::to_fragments).collect(),
            Some(close.to_string()),
        )]
    }
}

#[cfg(test)]
mod tests {
    use typedwire_codegen::builder::CodeBuilder;

    use super::*;

    #[test]
    fn test_empty_match() {
        let m = CodeBuilder::render(&Match::new("*self"));
        assert_eq!(m, "match *self {}\n");
    }

    #[test]
    fn test_bound_match() {
        let m = CodeBuilder::render(
            &Match::new("tag.as_str()")
                .bind("value")
                .arm(Arm::new("\"user\"").body("1"))
                .arm(Arm::new("other").body("return 2")),
        );
        assert_eq!(
            m,
            "let value = match tag.as_str() {\n    \"user\" => 1,\n    other => return 2,\n};\n"
        );
    }
}
