//! Runtime support for envelopes generated by typedwire.
//!
//! Generated code refers to this crate by path: variants carry their
//! discriminator through [`Tagged`], envelopes write themselves with
//! [`write_envelope`] and read through a buffered [`RawEnvelope`].

mod content;
mod error;
mod raw;
mod wire;

pub use content::Content;
pub use error::{Error, de_error, ser_error};
pub use raw::RawEnvelope;
pub use wire::{Keys, Tagged, write_envelope};

/// Re-exported so generated code needs no direct serde dependency.
pub use serde;
