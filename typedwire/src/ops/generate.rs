//! Generate operation - one envelope from command-line arguments.

use eyre::{Context, Result};
use tracing::{debug, info};
use typedwire_codegen_rust::{Generator, ImportStyle};
use typedwire_core::OutputTarget;
use typedwire_request::GenerationRequest;

use super::summarize;
use crate::{format, reports::GenerateReport};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub output: &'a OutputTarget,
    pub style: ImportStyle,
    /// Pipe the result through rustfmt.
    pub rustfmt: bool,
}

/// Render one request and write it to the output target.
pub fn generate(request: &GenerationRequest, opts: GenerateOptions) -> Result<GenerateReport> {
    debug!(
        capability = request.capability(),
        envelope = request.envelope(),
        module = request.module(),
        variants = request.variants().len(),
        "resolved request"
    );

    let code = render_file(std::slice::from_ref(request), opts.style, opts.rustfmt)?;
    let result = opts
        .output
        .write(&code)
        .wrap_err_with(|| format!("Failed to write {}", opts.output))?;
    info!(output = %opts.output, ?result, "generated {}", request.envelope());

    Ok(GenerateReport {
        summary: summarize(request, opts.output.to_string()),
        output: opts.output.clone(),
        result,
    })
}

/// Render the requests into the text of one file.
pub(crate) fn render_file(
    requests: &[GenerationRequest],
    style: ImportStyle,
    rustfmt: bool,
) -> Result<String> {
    let code = Generator::new(requests)
        .style(style)
        .render()
        .wrap_err("Failed to synthesize envelopes")?;

    if rustfmt {
        format::rustfmt(&code)
    } else {
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use typedwire_core::WriteResult;

    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::builder("Gateway")
            .module("example")
            .variant("user=UserGateway".parse().unwrap())
            .variant("orders=OrdersGateway".parse().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_generate_writes_then_skips_unchanged() {
        let temp = TempDir::new().unwrap();
        let output = OutputTarget::Path(temp.path().join("gateway_typedwire.rs"));
        let opts = || GenerateOptions {
            output: &output,
            style: ImportStyle::Qualified,
            rustfmt: false,
        };

        let first = generate(&request(), opts()).unwrap();
        assert_eq!(first.result, WriteResult::Written);
        assert_eq!(first.summary.headline(), "GatewayTyped (Gateway, 2 variants)");

        let content = fs::read_to_string(temp.path().join("gateway_typedwire.rs")).unwrap();
        assert!(content.starts_with("// Code generated by typedwire for module `example`."));
        assert!(content.contains("pub struct GatewayTyped {"));

        let second = generate(&request(), opts()).unwrap();
        assert_eq!(second.result, WriteResult::Unchanged);
    }

    #[test]
    fn test_render_file_matches_generator() {
        let requests = [request()];
        let code = render_file(&requests, ImportStyle::Hoisted, false).unwrap();
        let expected = Generator::new(&requests)
            .style(ImportStyle::Hoisted)
            .render()
            .unwrap();
        assert_eq!(code, expected);
    }
}
