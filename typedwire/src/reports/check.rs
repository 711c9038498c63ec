//! Check command report data structures.

use std::path::PathBuf;

use super::{
    EnvelopeSummary, count,
    output::{Output, Report},
};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the manifest.
    pub config_path: PathBuf,
    /// Module named in generated headers.
    pub module: String,
    pub envelopes: Vec<EnvelopeSummary>,
    /// Number of distinct output files.
    pub file_count: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("module", &self.module);
        out.key_value(
            "envelopes",
            &format!(
                "{} in {}",
                self.envelopes.len(),
                count(self.file_count, "file")
            ),
        );

        for envelope in &self.envelopes {
            out.newline();
            out.section(&envelope.headline());
            out.key_value_indented("file", &envelope.file);
            out.key_value_indented(
                "keys",
                &format!("{} / {}", envelope.tag_key, envelope.value_key),
            );
            for (tag, type_path) in &envelope.variants {
                out.list_item(&format!("{} => {}", tag, type_path));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferedOutput;

    #[test]
    fn test_lists_discriminators() {
        let report = CheckReport {
            config_path: PathBuf::from("typedwire.toml"),
            module: "example".into(),
            envelopes: vec![EnvelopeSummary {
                capability: "Gateway".into(),
                envelope: "GatewayTyped".into(),
                tag_key: "t".into(),
                value_key: "v".into(),
                variants: vec![
                    ("user".into(), "UserGateway".into()),
                    ("orders".into(), "OrdersGateway".into()),
                ],
                file: "gateway_typedwire.rs".into(),
            }],
            file_count: 1,
        };
        let mut out = BufferedOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "✓ typedwire.toml is valid",
                "",
                "module: example",
                "envelopes: 1 in 1 file",
                "",
                "GatewayTyped (Gateway, 2 variants):",
                "  file: gateway_typedwire.rs",
                "  keys: t / v",
                "  - user => UserGateway",
                "  - orders => OrdersGateway",
            ]
        );
    }
}
