use std::{fmt, str::FromStr};

use crate::{Error, discriminator::discriminator_for, validate::last_segment};

/// One concrete type admitted into an envelope.
///
/// Parsed from `alias=Type` or a bare `Type`. The type may be a path such as
/// `crate::gw::UserGateway`; its last segment names the enum case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    type_path: String,
    alias: Option<String>,
}

impl VariantSpec {
    /// A variant without an alias.
    pub fn new(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            alias: None,
        }
    }

    /// Set the alias. An empty alias counts as absent.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The type name without its module path.
    pub fn type_name(&self) -> &str {
        last_segment(&self.type_path)
    }

    /// The effective wire discriminator.
    pub fn discriminator(&self) -> String {
        discriminator_for(self)
    }
}

impl FromStr for VariantSpec {
    type Err = Box<Error>;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let (alias, type_path) = match token.split_once('=') {
            Some((alias, type_path)) => (alias.trim(), type_path.trim()),
            None => ("", token),
        };

        if type_path.is_empty() || type_path.contains('=') {
            return Err(Box::new(Error::MalformedVariant {
                token: token.to_string(),
            }));
        }

        Ok(VariantSpec::new(type_path).with_alias(alias))
    }
}

impl fmt::Display for VariantSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}={}", alias, self.type_path),
            None => f.write_str(&self.type_path),
        }
    }
}
