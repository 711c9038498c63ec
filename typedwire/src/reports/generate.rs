//! Generate command report data structures.

use typedwire_core::{OutputTarget, WriteResult};

use super::{
    count,
    output::{Output, Report},
};

/// What one envelope looks like once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeSummary {
    pub capability: String,
    pub envelope: String,
    pub tag_key: String,
    pub value_key: String,
    /// `(discriminator, type path)` in declaration order.
    pub variants: Vec<(String, String)>,
    /// File the envelope is rendered into.
    pub file: String,
}

impl EnvelopeSummary {
    /// `GatewayTyped (Gateway, 2 variants)`
    pub fn headline(&self) -> String {
        format!(
            "{} ({}, {})",
            self.envelope,
            self.capability,
            count(self.variants.len(), "variant")
        )
    }
}

/// Report data from a single `generate` run.
#[derive(Debug)]
pub struct GenerateReport {
    pub summary: EnvelopeSummary,
    pub output: OutputTarget,
    pub result: WriteResult,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&self.summary.headline());
        match self.result {
            WriteResult::Written => out.added_item(&self.output.to_string()),
            WriteResult::Unchanged => out.list_item(&format!("{} (unchanged)", self.output)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::reports::BufferedOutput;

    fn summary() -> EnvelopeSummary {
        EnvelopeSummary {
            capability: "Gateway".into(),
            envelope: "GatewayTyped".into(),
            tag_key: "t".into(),
            value_key: "v".into(),
            variants: vec![("user".into(), "UserGateway".into())],
            file: "gateway_typedwire.rs".into(),
        }
    }

    #[test]
    fn test_headline_counts_variants() {
        assert_eq!(summary().headline(), "GatewayTyped (Gateway, 1 variant)");
    }

    #[test]
    fn test_unchanged_file_is_marked() {
        let report = GenerateReport {
            summary: summary(),
            output: OutputTarget::Path(PathBuf::from("gateway_typedwire.rs")),
            result: WriteResult::Unchanged,
        };
        let mut out = BufferedOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "GatewayTyped (Gateway, 1 variant)",
                "  - gateway_typedwire.rs (unchanged)"
            ]
        );
    }
}
