use typedwire_core::to_snake_case;

use crate::{
    Discriminators, Error, Result, VariantSpec,
    validate::{check_identifier, check_type_path, last_segment},
};

/// Crate path generated code uses to reach the runtime support library.
pub const DEFAULT_RUNTIME: &str = "typedwire_runtime";

/// Derives applied to generated types when none are requested.
pub const DEFAULT_DERIVES: &[&str] = &["Debug", "Clone", "PartialEq"];

/// Traits the envelope implements by hand; deriving them would conflict.
const GENERATED_TRAITS: &[&str] = &["Serialize", "Deserialize"];

/// The two keys of a serialized envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireKeys {
    tag: String,
    value: String,
}

impl WireKeys {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Key holding the discriminator.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Key holding the variant's own encoding.
    pub fn value(&self) -> &str {
        &self.value
    }

    fn validate(&self) -> Result<()> {
        if self.tag.is_empty() || self.value.is_empty() {
            return Err(Box::new(Error::InvalidKeys {
                reason: "keys must not be empty".to_string(),
            }));
        }
        if self.tag == self.value {
            return Err(Box::new(Error::InvalidKeys {
                reason: format!("tag and value both use '{}'", self.tag),
            }));
        }
        Ok(())
    }
}

impl Default for WireKeys {
    fn default() -> Self {
        Self::new("t", "v")
    }
}

/// Values filled in when a request leaves them out.
///
/// The CLI builds this from its environment; library callers pass it
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    module: Option<String>,
    runtime: Option<String>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn runtime(&self) -> Option<&str> {
        self.runtime.as_deref()
    }
}

/// A validated request to synthesize one envelope.
///
/// Construct with [`GenerationRequest::builder`]. Once built, the
/// discriminators are known to be unique and every name is a valid Rust
/// identifier or path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    capability: String,
    envelope: String,
    module: String,
    variants: Vec<VariantSpec>,
    discriminators: Discriminators,
    runtime: String,
    keys: WireKeys,
    derives: Vec<String>,
}

impl GenerationRequest {
    pub fn builder(capability: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(capability)
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    pub fn envelope(&self) -> &str {
        &self.envelope
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn variants(&self) -> &[VariantSpec] {
        &self.variants
    }

    pub fn discriminators(&self) -> &Discriminators {
        &self.discriminators
    }

    /// Variants paired with their discriminators, in request order.
    pub fn variants_with_tags(&self) -> impl Iterator<Item = (&VariantSpec, &str)> {
        self.variants.iter().zip(self.discriminators.iter())
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn keys(&self) -> &WireKeys {
        &self.keys
    }

    pub fn derives(&self) -> &[String] {
        &self.derives
    }

    /// File name used when no output is given, e.g. `gateway_typedwire.rs`.
    pub fn default_file_name(&self) -> String {
        format!("{}_typedwire.rs", to_snake_case(&self.capability))
    }
}

/// Builder for [`GenerationRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    capability: String,
    envelope: Option<String>,
    module: Option<String>,
    variants: Vec<VariantSpec>,
    runtime: Option<String>,
    tag_key: Option<String>,
    value_key: Option<String>,
    derives: Option<Vec<String>>,
    defaults: Defaults,
}

impl RequestBuilder {
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            envelope: None,
            module: None,
            variants: Vec::new(),
            runtime: None,
            tag_key: None,
            value_key: None,
            derives: None,
            defaults: Defaults::default(),
        }
    }

    /// Envelope type name. Defaults to the capability name + `Typed`.
    pub fn envelope(mut self, envelope: impl Into<String>) -> Self {
        self.envelope = Some(envelope.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn variant(mut self, variant: VariantSpec) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = VariantSpec>) -> Self {
        self.variants.extend(variants);
        self
    }

    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = Some(key.into());
        self
    }

    pub fn value_key(mut self, key: impl Into<String>) -> Self {
        self.value_key = Some(key.into());
        self
    }

    /// Replace the default derives.
    pub fn derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives = Some(derives.into_iter().map(Into::into).collect());
        self
    }

    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resolve defaults and validate the request.
    pub fn build(self) -> Result<GenerationRequest> {
        let RequestBuilder {
            capability,
            envelope,
            module,
            variants,
            runtime,
            tag_key,
            value_key,
            derives,
            defaults,
        } = self;

        if capability.is_empty() {
            return Err(Error::empty_name("capability"));
        }
        check_identifier(&capability, "capability")?;

        let envelope = envelope
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("{}Typed", capability));
        check_identifier(&envelope, "envelope")?;
        if envelope == capability {
            return Err(Box::new(Error::NameClash { name: envelope }));
        }

        let module = module
            .or_else(|| defaults.module().map(str::to_string))
            .map(|m| m.replace('-', "_"))
            .filter(|m| !m.is_empty())
            .ok_or_else(|| Error::empty_name("module"))?;
        check_identifier(&module, "module")?;

        let runtime = runtime
            .or_else(|| defaults.runtime().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());
        check_type_path(&runtime, "runtime")?;

        let keys = WireKeys::new(
            tag_key.unwrap_or_else(|| "t".to_string()),
            value_key.unwrap_or_else(|| "v".to_string()),
        );
        keys.validate()?;

        let derives =
            derives.unwrap_or_else(|| DEFAULT_DERIVES.iter().map(|d| d.to_string()).collect());
        for derive in &derives {
            check_type_path(derive, "derive")?;
            if GENERATED_TRAITS.contains(&last_segment(derive)) {
                return Err(Box::new(Error::ConflictingDerive {
                    derive: derive.clone(),
                }));
            }
        }

        let mut seen: Vec<&str> = Vec::with_capacity(variants.len());
        for variant in &variants {
            check_type_path(variant.type_path(), "variant")?;

            let name = variant.type_name();
            if seen.contains(&name) {
                return Err(Box::new(Error::DuplicateVariant {
                    name: name.to_string(),
                }));
            }
            if name == capability || name == envelope {
                return Err(Box::new(Error::NameClash {
                    name: name.to_string(),
                }));
            }
            seen.push(name);
        }

        let discriminators = Discriminators::resolve(&variants)?;

        Ok(GenerationRequest {
            capability,
            envelope,
            module,
            variants,
            discriminators,
            runtime,
            keys,
            derives,
        })
    }
}
