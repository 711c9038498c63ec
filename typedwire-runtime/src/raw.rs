use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error as _},
};

use crate::{Content, Error};

/// An envelope buffered once, then decoded field by field.
///
/// The discriminator is decoded first; only then is the value decoded into
/// the concrete type it selects. Both passes read the same buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope(Content);

impl RawEnvelope {
    /// Buffer the input of any self-describing format.
    pub fn from_deserializer<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Content::deserialize(deserializer).map(Self)
    }

    /// Decode the discriminator stored under `key`.
    pub fn tag(&self, key: &'static str) -> Result<String, Error> {
        self.decode(key)
    }

    /// Decode the value stored under `key` into `T`.
    pub fn payload<T: DeserializeOwned>(&self, key: &'static str) -> Result<T, Error> {
        self.decode(key)
    }

    fn decode<T: DeserializeOwned>(&self, key: &'static str) -> Result<T, Error> {
        if !matches!(self.0, Content::Map(_)) {
            return Err(Error::custom(format!(
                "invalid type: {}, expected an envelope map",
                kind(&self.0)
            )));
        }
        self.0
            .get(key)
            .ok_or_else(|| Error::missing_field(key))?
            .decode()
    }
}

impl<'de> Deserialize<'de> for RawEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::from_deserializer(deserializer)
    }
}

impl From<Content> for RawEnvelope {
    fn from(content: Content) -> Self {
        Self(content)
    }
}

fn kind(content: &Content) -> &'static str {
    match content {
        Content::None | Content::Unit => "null",
        Content::Some(_) => "option",
        Content::Bool(_) => "boolean",
        Content::U64(_) | Content::I64(_) | Content::U128(_) | Content::I128(_) => "integer",
        Content::F64(_) => "float",
        Content::Char(_) | Content::String(_) => "string",
        Content::Bytes(_) => "bytes",
        Content::Newtype(_) => "newtype",
        Content::Seq(_) => "sequence",
        Content::Map(_) => "map",
        Content::Enum { .. } => "enum",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct UserGateway {
        host: String,
        port: u16,
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    enum Auth {
        Token(String),
    }

    fn json(text: &str) -> RawEnvelope {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_tag_then_payload() {
        let raw = json(r#"{"t": "user", "v": {"host": "localhost", "port": 8080}}"#);
        assert_eq!(raw.tag("t").unwrap(), "user");

        let gateway: UserGateway = raw.payload("v").unwrap();
        assert_eq!(
            gateway,
            UserGateway {
                host: "localhost".into(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_value_key_order_does_not_matter() {
        let raw = json(r#"{"v": {"host": "h", "port": 1}, "t": "user"}"#);
        assert_eq!(raw.tag("t").unwrap(), "user");
    }

    #[test]
    fn test_missing_tag() {
        let raw = json(r#"{"v": {}}"#);
        let err = raw.tag("t").unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
        assert!(err.to_string().contains("missing field `t`"));
    }

    #[test]
    fn test_not_a_map() {
        let raw = json(r#"["user"]"#);
        let err = raw.tag("t").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type: sequence, expected an envelope map"
        );
    }

    #[test]
    fn test_payload_type_mismatch() {
        let raw = json(r#"{"t": "user", "v": {"host": "h", "port": "x"}}"#);
        let result: Result<UserGateway, Error> = raw.payload("v");
        assert!(matches!(result, Err(Error::Codec(_))));
    }

    #[test]
    fn test_buffer_from_yaml() {
        let raw: RawEnvelope = serde_yaml::from_str("t: user\nv:\n  host: h\n  port: 2\n").unwrap();
        assert_eq!(raw.tag("t").unwrap(), "user");
        assert_eq!(raw.payload::<UserGateway>("v").unwrap().port, 2);
    }

    #[test]
    fn test_yaml_enum_payload() {
        let raw: RawEnvelope = serde_yaml::from_str("t: auth\nv: !Token abc\n").unwrap();
        assert_eq!(raw.payload::<Auth>("v").unwrap(), Auth::Token("abc".into()));
    }
}
