//! Core operations.
//!
//! The work behind each command, separated from argument parsing and
//! output rendering.

pub mod bake;
pub mod check;
pub mod generate;

pub use bake::{BakeOptions, bake};
pub use check::check;
pub use generate::{GenerateOptions, generate};
use typedwire_codegen_rust::ImportStyle;
use typedwire_request::{GenerationRequest, PlannedEnvelope};

use crate::reports::EnvelopeSummary;

/// Requests that render into the same file.
#[derive(Debug)]
pub(crate) struct OutputFile {
    pub path: String,
    pub requests: Vec<GenerationRequest>,
}

/// Group planned envelopes by output file, in order of first appearance.
pub(crate) fn group_by_file(planned: &[PlannedEnvelope]) -> Vec<OutputFile> {
    let mut files: Vec<OutputFile> = Vec::new();
    for envelope in planned {
        let path = envelope.output_file();
        match files.iter_mut().find(|f| f.path == path) {
            Some(file) => file.requests.push(envelope.request.clone()),
            None => files.push(OutputFile {
                path,
                requests: vec![envelope.request.clone()],
            }),
        }
    }
    files
}

pub(crate) fn import_style(hoist: bool) -> ImportStyle {
    if hoist {
        ImportStyle::Hoisted
    } else {
        ImportStyle::Qualified
    }
}

pub(crate) fn summarize(request: &GenerationRequest, file: impl Into<String>) -> EnvelopeSummary {
    EnvelopeSummary {
        capability: request.capability().to_string(),
        envelope: request.envelope().to_string(),
        tag_key: request.keys().tag().to_string(),
        value_key: request.keys().value().to_string(),
        variants: request
            .variants_with_tags()
            .map(|(variant, tag)| (tag.to_string(), variant.type_path().to_string()))
            .collect(),
        file: file.into(),
    }
}
