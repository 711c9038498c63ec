//! Bake command report data structures.

use std::path::PathBuf;

use super::{
    EnvelopeSummary, count,
    output::{Output, Report},
};

/// Report data from batch generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Every planned envelope, in manifest order.
    pub envelopes: Vec<EnvelopeSummary>,
    pub result: BakeResult,
}

/// Result of batch generation.
#[derive(Debug)]
pub enum BakeResult {
    /// Files were written under `output_dir`.
    Written {
        output_dir: PathBuf,
        written: Vec<String>,
        unchanged: Vec<String>,
    },
    /// Dry-run preview.
    Preview { files: Vec<PreviewFile> },
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            BakeResult::Written {
                output_dir,
                written,
                unchanged,
            } => {
                out.section(&format!("Envelopes ({})", self.envelopes.len()));
                for envelope in &self.envelopes {
                    out.list_item(&format!("{} -> {}", envelope.headline(), envelope.file));
                }
                out.newline();
                out.key_value("Output", &output_dir.display().to_string());
                for file in written {
                    out.added_item(file);
                }
                for file in unchanged {
                    out.list_item(&format!("{} (unchanged)", file));
                }
            }
            BakeResult::Preview { files } => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!(
                    "{} would be generated",
                    count(files.len(), "file")
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferedOutput;

    #[test]
    fn test_preview_lists_files_then_summary() {
        let report = BakeReport {
            envelopes: Vec::new(),
            result: BakeResult::Preview {
                files: vec![PreviewFile {
                    path: "src/gateway_typedwire.rs".into(),
                    content: "// generated".into(),
                }],
            },
        };
        let mut out = BufferedOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "── src/gateway_typedwire.rs ──",
                "// generated",
                "── Summary ──",
                "1 file would be generated",
            ]
        );
    }
}
