use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sigil_key::JwsAlgorithm;

use crate::{base64url_to_object, object_to_base64url, JwtError};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The token type marker stamped into every header.
pub const TOKEN_TYPE: &str = "JWT";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The header part of a token: the token-type marker, the signing algorithm,
/// an optional key identifier, and any additional fields passed through
/// opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtHeader {
    alg: JwsAlgorithm,
    kid: Option<String>,
    extra: Map<String, Value>,
}

//--------------------------------------------------------------------------------------------------
// Types: Serde
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct JwtHeaderSerde {
    #[serde(default)]
    typ: Option<String>,

    alg: JwsAlgorithm,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    kid: Option<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtHeader {
    /// Creates a header for the given algorithm and key identifier.
    pub fn new(alg: JwsAlgorithm, kid: impl Into<String>) -> Self {
        Self {
            alg,
            kid: Some(kid.into()),
            extra: Map::new(),
        }
    }

    /// Creates a header with no key identifier.
    pub fn with_alg(alg: JwsAlgorithm) -> Self {
        Self {
            alg,
            kid: None,
            extra: Map::new(),
        }
    }

    /// Returns the algorithm declared for the token signature.
    pub fn alg(&self) -> JwsAlgorithm {
        self.alg
    }

    /// Returns the key identifier, if present.
    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    /// Returns the additional header fields.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Adds an additional header field, returning the header for chaining.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Serialize for JwtHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // The reserved names always come from the typed fields; whatever the
        // caller stashed under them in `extra` is overwritten.
        let mut extra = self.extra.clone();
        extra.remove("typ");
        extra.remove("alg");
        extra.remove("kid");

        JwtHeaderSerde {
            typ: Some(TOKEN_TYPE.to_string()),
            alg: self.alg,
            kid: self.kid.clone(),
            extra,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JwtHeader {
    fn deserialize<D>(deserializer: D) -> Result<JwtHeader, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let header = JwtHeaderSerde::deserialize(deserializer)?;

        // A missing `typ` is tolerated; a declared one must name a JWT.
        if let Some(typ) = header.typ {
            if typ != TOKEN_TYPE {
                return Err(serde::de::Error::custom(JwtError::UnsupportedTokenType(
                    typ,
                )));
            }
        }

        Ok(JwtHeader {
            alg: header.alg,
            kid: header.kid,
            extra: header.extra,
        })
    }
}

impl Display for JwtHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = object_to_base64url(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", encoded)
    }
}

impl FromStr for JwtHeader {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        base64url_to_object(s)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test_log::test]
    fn test_header_display() -> anyhow::Result<()> {
        let header = JwtHeader::with_alg(JwsAlgorithm::EdDSA);

        let displayed = header.to_string();
        tracing::debug!(?displayed);
        assert_eq!(displayed, "eyJ0eXAiOiJKV1QiLCJhbGciOiJFZERTQSJ9");

        let parsed: JwtHeader = displayed.parse()?;
        assert_eq!(parsed, header);

        let header = JwtHeader::new(JwsAlgorithm::ES256, "abc");

        let displayed = header.to_string();
        tracing::debug!(?displayed);
        assert_eq!(displayed, "eyJ0eXAiOiJKV1QiLCJhbGciOiJFUzI1NiIsImtpZCI6ImFiYyJ9");

        let parsed: JwtHeader = displayed.parse()?;
        assert_eq!(parsed, header);

        Ok(())
    }

    #[test_log::test]
    fn test_header_extra_fields_pass_through() -> anyhow::Result<()> {
        let header = JwtHeader::new(JwsAlgorithm::RS256, "k1").with_field("cty", json!("JWT"));

        let serialized = serde_json::to_string(&header)?;
        tracing::debug!(?serialized);
        assert_eq!(
            serialized,
            r#"{"typ":"JWT","alg":"RS256","kid":"k1","cty":"JWT"}"#
        );

        let deserialized: JwtHeader = serde_json::from_str(&serialized)?;
        assert_eq!(deserialized, header);
        assert_eq!(deserialized.extra().get("cty"), Some(&json!("JWT")));

        Ok(())
    }

    #[test_log::test]
    fn test_header_none_algorithm_still_decodes() -> anyhow::Result<()> {
        let parsed: JwtHeader = "eyJ0eXAiOiJKV1QiLCJhbGciOiJub25lIn0".parse()?;
        assert_eq!(parsed.alg(), JwsAlgorithm::None);

        Ok(())
    }

    #[test_log::test]
    fn test_header_rejects_wrong_token_type() {
        let value = json!({ "typ": "JWE", "alg": "RS256" });
        let result = serde_json::from_value::<JwtHeader>(value);
        assert!(result.is_err());
    }
}
