//! Check operation - manifest validation.

use std::path::Path;

use eyre::{Context, Result};
use tracing::debug;
use typedwire_request::PlannedEnvelope;

use super::{generate::render_file, group_by_file, import_style, summarize};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Planning has already validated every request. Each output file is also
/// synthesized in memory, which catches clashes between envelopes sharing it.
pub fn check(
    planned: &[PlannedEnvelope],
    module: &str,
    hoist_imports: bool,
    config_path: &Path,
) -> Result<CheckReport> {
    let files = group_by_file(planned);
    for file in &files {
        render_file(&file.requests, import_style(hoist_imports), false)
            .wrap_err_with(|| format!("Invalid envelopes for {}", file.path))?;
        debug!(file = %file.path, "synthesized");
    }

    Ok(CheckReport {
        config_path: config_path.to_path_buf(),
        module: module.to_string(),
        envelopes: planned
            .iter()
            .map(|p| summarize(&p.request, p.output_file()))
            .collect(),
        file_count: files.len(),
    })
}
