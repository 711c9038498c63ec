use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for request operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the manifest content and filename so errors raised while
/// resolving envelopes can point back into the file.
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of `value` in an assignment `key = "value"`.
    pub fn find_assignment(&self, key: &str, value: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", value);
        let mut offset = 0;
        for line in self.src.split_inclusive('\n') {
            let start = offset;
            offset += line.len();

            let Some(rest) = line.trim_start().strip_prefix(key) else {
                continue;
            };
            let Some(rhs) = rest.trim_start().strip_prefix('=') else {
                continue;
            };
            let rhs = rhs.trim_start();
            if rhs.starts_with(&quoted) {
                let pos = start + line.len() - rhs.len() + 1;
                return Some(SourceSpan::from((pos, value.len())));
            }
        }
        None
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Attach the manifest location of an envelope to a request error.
    pub fn envelope_error(&self, capability: &str, source: Box<Error>) -> Box<Error> {
        Box::new(Error::Envelope {
            src: self.named_source(),
            span: self.find_assignment("capability", capability),
            capability: capability.to_string(),
            source,
        })
    }
}

/// Configuration errors: a malformed or ambiguous request.
///
/// Every variant is raised before any text is synthesized.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(
        code(typedwire::io),
        help("create a typedwire.toml, or use `typedwire generate` for a single envelope")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest")]
    #[diagnostic(code(typedwire::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid envelope for capability '{capability}'")]
    #[diagnostic(code(typedwire::envelope))]
    Envelope {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: Option<SourceSpan>,
        capability: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{what} name must not be empty")]
    #[diagnostic(code(typedwire::empty_name))]
    EmptyName { what: &'static str },

    #[error("malformed variant '{token}'")]
    #[diagnostic(
        code(typedwire::malformed_variant),
        help("variants are written as `alias=Type` or `Type`")
    )]
    MalformedVariant { token: String },

    #[error("'{name}' is a Rust reserved keyword")]
    #[diagnostic(
        code(typedwire::reserved_keyword),
        help("rename the {context} '{name}' to something else, e.g. '{name}_'")
    )]
    ReservedKeyword { name: String, context: String },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(
        code(typedwire::invalid_identifier),
        help(
            "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
        )
    )]
    InvalidIdentifier {
        name: String,
        context: String,
        reason: String,
    },

    #[error("duplicate discriminator '{discriminator}'")]
    #[diagnostic(
        code(typedwire::duplicate_discriminator),
        help(
            "'{first}' and '{second}' resolve to the same tag; give one of them a distinct alias, e.g. 'other={second}'"
        )
    )]
    DuplicateDiscriminator {
        discriminator: String,
        first: String,
        second: String,
    },

    #[error("variant '{name}' is listed more than once")]
    #[diagnostic(
        code(typedwire::duplicate_variant),
        help("each concrete type name can back only one variant of an envelope")
    )]
    DuplicateVariant { name: String },

    #[error("'{name}' collides with a generated type")]
    #[diagnostic(
        code(typedwire::name_clash),
        help("capability, envelope and variant types must all have distinct names")
    )]
    NameClash { name: String },

    #[error("'{name}' is defined by more than one envelope")]
    #[diagnostic(code(typedwire::duplicate_envelope))]
    DuplicateEnvelope { name: String },

    #[error("derive '{derive}' conflicts with the generated serde impls")]
    #[diagnostic(
        code(typedwire::conflicting_derive),
        help("the envelope writes its own Serialize and Deserialize impls; remove '{derive}' from the derives")
    )]
    ConflictingDerive { derive: String },

    #[error("invalid wire keys: {reason}")]
    #[diagnostic(code(typedwire::wire_keys))]
    InvalidKeys { reason: String },
}

impl Error {
    /// Create an empty name error
    pub fn empty_name(what: &'static str) -> Box<Self> {
        Box::new(Error::EmptyName { what })
    }

    /// Create a reserved keyword error
    pub fn reserved_keyword(name: impl Into<String>, context: impl Into<String>) -> Box<Self> {
        Box::new(Error::ReservedKeyword {
            name: name.into(),
            context: context.into(),
        })
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::InvalidIdentifier {
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }
}
