use thiserror::Error;

/// Failures of a generated envelope at run time.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing an envelope that holds no value.
    #[error("{envelope} holds no value to write")]
    MissingValue { envelope: &'static str },

    /// Reading a discriminator that names no known variant.
    #[error("unknown variant `{tag}` for {envelope}")]
    UnknownVariant { envelope: &'static str, tag: String },

    /// The underlying value could not be decoded.
    #[error("{0}")]
    Codec(String),
}

impl serde::de::Error for Error {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Codec(msg.to_string())
    }
}

impl Error {
    pub fn missing_value(envelope: &'static str) -> Self {
        Self::MissingValue { envelope }
    }

    pub fn unknown_variant(envelope: &'static str, tag: impl Into<String>) -> Self {
        Self::UnknownVariant {
            envelope,
            tag: tag.into(),
        }
    }
}

/// Carry an envelope error out of a `Serialize` impl.
pub fn ser_error<E: serde::ser::Error>(err: Error) -> E {
    E::custom(err)
}

/// Carry an envelope error out of a `Deserialize` impl.
pub fn de_error<E: serde::de::Error>(err: Error) -> E {
    E::custom(err)
}
