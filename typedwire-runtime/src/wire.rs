use serde::{Serialize, Serializer, ser::SerializeStruct};

/// The intrinsic label of a variant within capability `C`.
///
/// A type admitted into several envelopes carries one label per capability.
pub trait Tagged<C> {
    const TAG: &'static str;

    fn tag(&self) -> &'static str {
        Self::TAG
    }
}

/// Keys of the two-entry envelope mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keys {
    pub tag: &'static str,
    pub value: &'static str,
}

impl Keys {
    pub const DEFAULT: Keys = Keys::new("t", "v");

    pub const fn new(tag: &'static str, value: &'static str) -> Self {
        Self { tag, value }
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Write `{tag-key: tag, value-key: value}`, discriminator first.
pub fn write_envelope<S, V>(
    serializer: S,
    envelope: &'static str,
    keys: Keys,
    tag: &'static str,
    value: &V,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize + ?Sized,
{
    let mut state = serializer.serialize_struct(envelope, 2)?;
    state.serialize_field(keys.tag, tag)?;
    state.serialize_field(keys.value, value)?;
    state.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Disk {
        path: String,
    }

    impl Tagged<()> for Disk {
        const TAG: &'static str = "disk";
    }

    struct Wrapper(Disk);

    impl Serialize for Wrapper {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            write_envelope(serializer, "Wrapper", Keys::DEFAULT, self.0.tag(), &self.0)
        }
    }

    #[test]
    fn test_tag_comes_first() {
        let json = serde_json::to_string(&Wrapper(Disk {
            path: "/data".into(),
        }))
        .unwrap();
        assert_eq!(json, r#"{"t":"disk","v":{"path":"/data"}}"#);
    }

    #[test]
    fn test_custom_keys_in_yaml() {
        struct Custom(Disk);
        impl Serialize for Custom {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                write_envelope(serializer, "Custom", Keys::new("kind", "spec"), Disk::TAG, &self.0)
            }
        }

        let yaml = serde_yaml::to_string(&Custom(Disk { path: "/d".into() })).unwrap();
        assert_eq!(yaml, "kind: disk\nspec:\n  path: /d\n");
    }
}
