//! File-level generation: one or more envelopes rendered into one Rust file.

use typedwire_request::{Error, GenerationRequest, Result};

use crate::{
    envelope::{EnvelopeSynthesizer, SynthesizedAdapter},
    paths::{ImportStyle, Paths},
    rust_file::{RustFile, render_imports},
};

/// Renders requests into the text of a single Rust file.
///
/// Output is a pure function of the requests and the import style.
pub struct Generator<'a> {
    requests: &'a [GenerationRequest],
    style: ImportStyle,
}

impl<'a> Generator<'a> {
    pub fn new(requests: &'a [GenerationRequest]) -> Self {
        Self {
            requests,
            style: ImportStyle::default(),
        }
    }

    pub fn style(mut self, style: ImportStyle) -> Self {
        self.style = style;
        self
    }

    /// Synthesize each request without rendering the file around it.
    pub fn adapters(&self) -> Result<Vec<SynthesizedAdapter>> {
        Ok(self.synthesize()?.0)
    }

    /// Render the complete file.
    pub fn render(&self) -> Result<String> {
        let (adapters, paths) = self.synthesize()?;

        let mut modules: Vec<&str> = Vec::new();
        for request in self.requests {
            if !modules.contains(&request.module()) {
                modules.push(request.module());
            }
        }
        let module = modules
            .iter()
            .map(|m| format!("`{}`", m))
            .collect::<Vec<_>>()
            .join(", ");

        let header = if module.is_empty() {
            "Code generated by typedwire. DO NOT EDIT.".to_string()
        } else {
            format!("Code generated by typedwire for module {}. DO NOT EDIT.", module)
        };

        let mut file = RustFile::new()
            .header(header)
            .use_stmts(render_imports(&paths.into_imports()));
        for adapter in adapters {
            file = file.add(adapter);
        }

        Ok(file.render())
    }

    fn synthesize(&self) -> Result<(Vec<SynthesizedAdapter>, Paths)> {
        let mut paths = Paths::new(self.style);
        let mut names: Vec<&str> = Vec::new();

        for request in self.requests {
            for name in [request.capability(), request.envelope()] {
                if names.contains(&name) {
                    return Err(Box::new(Error::DuplicateEnvelope {
                        name: name.to_string(),
                    }));
                }
                names.push(name);
                paths.reserve(name);
            }
            for variant in request.variants() {
                if !variant.type_path().contains("::") {
                    paths.reserve(variant.type_name());
                }
            }
        }

        let adapters = self
            .requests
            .iter()
            .map(|request| EnvelopeSynthesizer::new(request).synthesize(&mut paths))
            .collect();

        Ok((adapters, paths))
    }
}
