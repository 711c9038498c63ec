// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Request model for typedwire.
//!
//! A [`GenerationRequest`] describes one envelope to synthesize: the
//! capability name, the envelope type name, the owning module and the
//! ordered variant list. Requests are built and validated through a
//! [`RequestBuilder`], either directly or from a `typedwire.toml`
//! [`Manifest`].

mod discriminator;
mod error;
mod manifest;
mod request;
mod validate;
mod variant;

pub use discriminator::{Discriminators, discriminator_for};
pub use error::{Error, Result, SourceContext};
pub use manifest::{EnvelopeEntry, MANIFEST_FILE, Manifest, PlannedEnvelope};
pub use request::{
    DEFAULT_DERIVES, DEFAULT_RUNTIME, Defaults, GenerationRequest, RequestBuilder, WireKeys,
};
pub use variant::VariantSpec;
