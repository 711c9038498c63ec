//! Discriminator policy: how each variant is labelled on the wire.

use crate::{Error, Result, VariantSpec};

/// The wire label of a variant.
///
/// A non-empty alias is used verbatim; otherwise the type name is
/// lower-cased (`UserGateway` -> `usergateway`).
pub fn discriminator_for(variant: &VariantSpec) -> String {
    match variant.alias() {
        Some(alias) => alias.to_string(),
        None => variant.type_name().to_lowercase(),
    }
}

/// Discriminators for an ordered list of variants, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Discriminators {
    tags: Vec<String>,
}

impl Discriminators {
    /// Compute the table, rejecting labels that collide after case folding.
    pub fn resolve(variants: &[VariantSpec]) -> Result<Self> {
        let mut tags: Vec<String> = Vec::with_capacity(variants.len());

        for (i, variant) in variants.iter().enumerate() {
            let tag = discriminator_for(variant);
            let folded = tag.to_lowercase();

            if let Some(j) = tags.iter().position(|t| t.to_lowercase() == folded) {
                return Err(Box::new(Error::DuplicateDiscriminator {
                    discriminator: tag,
                    first: variants[j].type_path().to_string(),
                    second: variants[i].type_path().to_string(),
                }));
            }

            tags.push(tag);
        }

        Ok(Self { tags })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(tokens: &[&str]) -> Vec<VariantSpec> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_alias_is_verbatim() {
        let variant = VariantSpec::new("UserGateway").with_alias("User");
        assert_eq!(discriminator_for(&variant), "User");
    }

    #[test]
    fn test_type_name_is_lowercased() {
        let variant = VariantSpec::new("crate::gw::OrdersGateway");
        assert_eq!(discriminator_for(&variant), "ordersgateway");
    }

    #[test]
    fn test_resolve_keeps_order() {
        let tags = Discriminators::resolve(&variants(&["orders=OrdersGateway", "UserGateway"])).unwrap();
        insta::assert_snapshot!(tags.iter().collect::<Vec<_>>().join(","), @"orders,usergateway");
    }

    #[test]
    fn test_resolve_rejects_duplicates() {
        let err = Discriminators::resolve(&variants(&["user=A", "user=B"])).unwrap_err();
        match *err {
            Error::DuplicateDiscriminator { first, second, .. } => {
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rejects_case_collisions() {
        let result = Discriminators::resolve(&variants(&["usergateway=A", "UserGateway"]));
        assert!(result.is_err());

        let result = Discriminators::resolve(&variants(&["User=A", "user=B"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_empty() {
        let tags = Discriminators::resolve(&[]).unwrap();
        assert_eq!(tags.iter().count(), 0);
    }
}
