//! Bake operation - batch generation from a manifest.

use std::path::Path;

use eyre::{Context, Result};
use tracing::{debug, info};
use typedwire_core::{File, WriteResult};
use typedwire_request::PlannedEnvelope;

use super::{generate::render_file, group_by_file, import_style, summarize};
use crate::reports::{BakeReport, BakeResult, PreviewFile};

/// Options for the bake operation.
pub struct BakeOptions<'a> {
    /// Directory that relative output paths are resolved against.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    pub hoist_imports: bool,
    pub rustfmt: bool,
}

/// Execute the bake operation.
///
/// Envelopes that share an output file are rendered together, so their
/// imports are merged into one `use` section.
pub fn bake(planned: &[PlannedEnvelope], opts: BakeOptions) -> Result<BakeReport> {
    let envelopes = planned
        .iter()
        .map(|p| summarize(&p.request, p.output_file()))
        .collect();

    let style = import_style(opts.hoist_imports);
    let mut previews = Vec::new();
    let mut written = Vec::new();
    let mut unchanged = Vec::new();

    for file in group_by_file(planned) {
        debug!(file = %file.path, envelopes = file.requests.len(), "rendering");
        let code = render_file(&file.requests, style, opts.rustfmt)
            .wrap_err_with(|| format!("Failed to render {}", file.path))?;

        if opts.dry_run {
            previews.push(PreviewFile {
                path: file.path,
                content: code,
            });
            continue;
        }

        let target = File::new(opts.output_dir.join(&file.path), code);
        match target
            .write()
            .wrap_err_with(|| format!("Failed to write {}", target.path().display()))?
        {
            WriteResult::Written => {
                info!(file = %target.path().display(), "written");
                written.push(file.path);
            }
            WriteResult::Unchanged => {
                debug!(file = %target.path().display(), "unchanged");
                unchanged.push(file.path);
            }
        }
    }

    let result = if opts.dry_run {
        BakeResult::Preview { files: previews }
    } else {
        BakeResult::Written {
            output_dir: opts.output_dir.to_path_buf(),
            written,
            unchanged,
        }
    };

    Ok(BakeReport { envelopes, result })
}
