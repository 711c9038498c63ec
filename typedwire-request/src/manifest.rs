use std::{path::Path, str::FromStr};

use serde::Deserialize;

use crate::{Defaults, Error, GenerationRequest, Result, SourceContext, VariantSpec};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "typedwire.toml";

/// Root of a `typedwire.toml` batch manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Module named in generated headers; falls back to the caller's defaults
    #[serde(default)]
    pub module: Option<String>,

    /// Runtime crate path referenced by generated code
    #[serde(default)]
    pub runtime: Option<String>,

    /// Emit `use` lines instead of fully qualified paths
    #[serde(default)]
    pub hoist_imports: bool,

    /// One entry per `[[envelope]]` table
    #[serde(default, rename = "envelope")]
    pub envelopes: Vec<EnvelopeEntry>,

    #[serde(skip)]
    source: SourceContext,
}

/// A single `[[envelope]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeEntry {
    pub capability: String,

    #[serde(default)]
    pub typed: Option<String>,

    /// Output file, relative to the output directory
    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub variants: Vec<String>,

    #[serde(default)]
    pub tag_key: Option<String>,

    #[serde(default)]
    pub value_key: Option<String>,

    #[serde(default)]
    pub derives: Option<Vec<String>>,
}

/// A resolved envelope and the file it goes to (`None` means the default
/// file name for its capability).
#[derive(Debug, Clone)]
pub struct PlannedEnvelope {
    pub request: GenerationRequest,
    pub output: Option<String>,
}

impl PlannedEnvelope {
    /// Output file for this envelope.
    pub fn output_file(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| self.request.default_file_name())
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, MANIFEST_FILE)
    }
}

impl Manifest {
    /// Parse a typedwire.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a manifest from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let source = SourceContext::new(content, filename);
        let mut manifest: Self = toml::from_str(content).map_err(|e| source.parse_error(e))?;
        manifest.source = source;
        Ok(manifest)
    }

    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Resolve every envelope into a validated request.
    ///
    /// Values set in the manifest take precedence over `defaults`. Errors
    /// point at the envelope's capability in the source.
    pub fn plan(&self, defaults: &Defaults) -> Result<Vec<PlannedEnvelope>> {
        let mut defaults = defaults.clone();
        if let Some(module) = &self.module {
            defaults = defaults.with_module(module);
        }
        if let Some(runtime) = &self.runtime {
            defaults = defaults.with_runtime(runtime);
        }

        let mut names: Vec<String> = Vec::new();
        let mut planned = Vec::with_capacity(self.envelopes.len());

        for entry in &self.envelopes {
            let request = entry
                .request(&defaults)
                .map_err(|e| self.source.envelope_error(&entry.capability, e))?;

            for name in [request.capability(), request.envelope()] {
                if names.iter().any(|n| n == name) {
                    let err = Box::new(Error::DuplicateEnvelope {
                        name: name.to_string(),
                    });
                    return Err(self.source.envelope_error(&entry.capability, err));
                }
                names.push(name.to_string());
            }

            planned.push(PlannedEnvelope {
                request,
                output: entry.output.clone(),
            });
        }

        Ok(planned)
    }
}

impl EnvelopeEntry {
    fn request(&self, defaults: &Defaults) -> Result<GenerationRequest> {
        let variants = self
            .variants
            .iter()
            .map(|token| token.parse::<VariantSpec>())
            .collect::<Result<Vec<_>>>()?;

        let mut builder = GenerationRequest::builder(&self.capability)
            .defaults(defaults.clone())
            .variants(variants);

        if let Some(typed) = &self.typed {
            builder = builder.envelope(typed);
        }
        if let Some(key) = &self.tag_key {
            builder = builder.tag_key(key);
        }
        if let Some(key) = &self.value_key {
            builder = builder.value_key(key);
        }
        if let Some(derives) = &self.derives {
            builder = builder.derives(derives.iter().cloned());
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATEWAY: &str = r#"
module = "example"

[[envelope]]
capability = "Gateway"
variants = ["user=UserGateway", "orders=OrdersGateway"]

[[envelope]]
capability = "Storage"
typed = "StorageSpec"
output = "storage.rs"
variants = ["Disk", "s3=S3Bucket"]
tag_key = "kind"
value_key = "spec"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: Manifest = GATEWAY.parse().unwrap();
        assert_eq!(manifest.module.as_deref(), Some("example"));
        assert!(!manifest.hoist_imports);
        assert_eq!(manifest.envelopes.len(), 2);
        assert_eq!(manifest.envelopes[1].typed.as_deref(), Some("StorageSpec"));
    }

    #[test]
    fn test_plan() {
        let manifest: Manifest = GATEWAY.parse().unwrap();
        let planned = manifest.plan(&Defaults::new()).unwrap();

        assert_eq!(planned[0].request.envelope(), "GatewayTyped");
        assert_eq!(planned[0].output_file(), "gateway_typedwire.rs");
        assert_eq!(planned[1].output_file(), "storage.rs");
        assert_eq!(planned[1].request.keys().tag(), "kind");

        let tags: Vec<_> = planned[1].request.discriminators().iter().collect();
        insta::assert_snapshot!(tags.join(","), @"disk,s3");
    }

    #[test]
    fn test_manifest_module_overrides_defaults() {
        let manifest: Manifest = GATEWAY.parse().unwrap();
        let planned = manifest.plan(&Defaults::new().with_module("other")).unwrap();
        assert_eq!(planned[0].request.module(), "example");
    }

    #[test]
    fn test_module_from_defaults() {
        let manifest: Manifest = "[[envelope]]\ncapability = \"Gateway\"".parse().unwrap();
        let planned = manifest.plan(&Defaults::new().with_module("svc")).unwrap();
        assert_eq!(planned[0].request.module(), "svc");
    }

    #[test]
    fn test_unknown_field() {
        let result: Result<Manifest> = "[[envelope]]\ncapability = \"A\"\ntags = []".parse();
        let err = result.unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_plan_error_points_at_envelope() {
        let src = r#"
module = "example"
# "Gateway" fronts user traffic

[[envelope]]
capability = "Gateway"
variants = ["user=UserGateway", "user=AdminGateway"]
"#;
        let manifest: Manifest = src.parse().unwrap();
        let err = manifest.plan(&Defaults::new()).unwrap_err();
        match *err {
            Error::Envelope {
                span, capability, source, ..
            } => {
                assert_eq!(capability, "Gateway");
                let span = span.unwrap();
                assert_eq!(&src[span.offset()..span.offset() + span.len()], "Gateway");
                assert_eq!(span.offset(), src.find("capability = ").unwrap() + 14);
                assert!(matches!(*source, Error::DuplicateDiscriminator { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_envelope() {
        let src = r#"
module = "example"

[[envelope]]
capability = "Gateway"

[[envelope]]
capability = "Other"
typed = "GatewayTyped"
"#;
        let manifest: Manifest = src.parse().unwrap();
        let err = manifest.plan(&Defaults::new()).unwrap_err();
        let Error::Envelope { source, .. } = *err else {
            panic!("expected envelope error");
        };
        assert!(matches!(*source, Error::DuplicateEnvelope { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, GATEWAY).unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert!(manifest.source().filename().ends_with(MANIFEST_FILE));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
