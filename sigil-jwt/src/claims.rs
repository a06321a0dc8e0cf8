use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{base64url_to_object, object_to_base64url, JwtError, JwtResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The payload part of a token: the reserved, semantically-checked claims
/// plus arbitrary caller fields passed through opaquely.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience: a single principal or a list of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration time, in Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,

    /// Not-before time, in Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,

    /// Issued-at time, in Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// Token identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional claims passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `aud` claim: one audience or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// A single audience.
    One(String),

    /// Multiple audiences.
    Many(Vec<String>),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtClaims {
    /// Creates an empty claims set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an additional claim, returning the claims set for chaining.
    pub fn with_claim(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Checks the time-based claims against `now`, in Unix seconds: `nbf`
    /// must not be in the future, and `exp`, when present, must be strictly
    /// in the future. Equality with `exp` already counts as expired.
    pub fn validate_time(&self, now: u64) -> JwtResult<()> {
        if let Some(nbf) = self.nbf {
            if nbf > now {
                return Err(JwtError::NotYetValid { nbf, now });
            }
        }

        if let Some(exp) = self.exp {
            if exp <= now {
                return Err(JwtError::Expired { exp, now });
            }
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwtClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let encoded = object_to_base64url(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", encoded)
    }
}

impl FromStr for JwtClaims {
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
    fn test_claims_display() -> anyhow::Result<()> {
        let claims = JwtClaims {
            sub: Some("me".to_string()),
            exp: Some(1609459230),
            iat: Some(1609459200),
            ..Default::default()
        };

        let displayed = claims.to_string();
        tracing::debug!(?displayed);
        assert_eq!(
            displayed,
            "eyJzdWIiOiJtZSIsImV4cCI6MTYwOTQ1OTIzMCwiaWF0IjoxNjA5NDU5MjAwfQ"
        );

        let parsed: JwtClaims = displayed.parse()?;
        assert_eq!(parsed, claims);

        Ok(())
    }

    #[test_log::test]
    fn test_claims_serde_round_trip() -> anyhow::Result<()> {
        let claims = JwtClaims {
            iss: Some("https://issuer.example".to_string()),
            aud: Some(Audience::Many(vec![
                "svc-a".to_string(),
                "svc-b".to_string(),
            ])),
            jti: Some("7f1c".to_string()),
            ..Default::default()
        }
        .with_claim("cap", json!({ "team:123": ["read", "publish"] }));

        let serialized = serde_json::to_string(&claims)?;
        tracing::debug!(?serialized);

        let deserialized: JwtClaims = serde_json::from_str(&serialized)?;
        assert_eq!(deserialized, claims);
        assert_eq!(
            deserialized.extra.get("cap"),
            Some(&json!({ "team:123": ["read", "publish"] }))
        );

        Ok(())
    }

    #[test_log::test]
    fn test_time_validation_boundaries() {
        let now = 1609459200;

        // nbf in the future is rejected; nbf == now is accepted.
        let claims = JwtClaims {
            nbf: Some(now + 1),
            ..Default::default()
        };
        assert!(matches!(
            claims.validate_time(now),
            Err(JwtError::NotYetValid { nbf, .. }) if nbf == now + 1
        ));

        let claims = JwtClaims {
            nbf: Some(now),
            ..Default::default()
        };
        assert!(claims.validate_time(now).is_ok());

        // exp == now already counts as expired; exp == now + 1 is accepted.
        let claims = JwtClaims {
            exp: Some(now),
            ..Default::default()
        };
        assert!(matches!(
            claims.validate_time(now),
            Err(JwtError::Expired { exp, .. }) if exp == now
        ));

        let claims = JwtClaims {
            exp: Some(now + 1),
            ..Default::default()
        };
        assert!(claims.validate_time(now).is_ok());

        // The not-yet-valid check runs before the expiry check.
        let claims = JwtClaims {
            nbf: Some(now + 10),
            exp: Some(now),
            ..Default::default()
        };
        assert!(matches!(
            claims.validate_time(now),
            Err(JwtError::NotYetValid { .. })
        ));
    }
}
