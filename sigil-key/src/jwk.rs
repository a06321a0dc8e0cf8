use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EcCurve, ImportParams, JwsAlgorithm, KeyError, KeyResult, SigningParams};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A JSON Web Key restricted to the key families this crate can import.
///
/// The `kty` field selects the variant; any other key type is rejected at
/// construction with [`KeyError::UnsupportedKeyType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jwk {
    /// An elliptic curve key (`kty: "EC"`).
    Ec(EcJwk),

    /// An RSA key (`kty: "RSA"`).
    Rsa(RsaJwk),

    /// An octet key pair, i.e. an edwards curve key (`kty: "OKP"`).
    Okp(OkpJwk),
}

/// Components of an elliptic curve JWK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcJwk {
    /// Curve name, e.g. `P-256`.
    pub crv: String,

    /// Base64url-encoded affine x coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Base64url-encoded affine y coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    /// Base64url-encoded private scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Declared algorithm hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

/// Components of an RSA JWK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaJwk {
    /// Base64url-encoded modulus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Base64url-encoded public exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,

    /// Base64url-encoded private exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    /// Base64url-encoded first prime factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,

    /// Base64url-encoded second prime factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Base64url-encoded first CRT exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,

    /// Base64url-encoded second CRT exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,

    /// Base64url-encoded CRT coefficient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,

    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Declared algorithm. RSA keys must declare one of the RS* set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

/// Components of an octet key pair (edwards curve) JWK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkpJwk {
    /// Curve name. Only `Ed25519` is supported.
    pub crv: String,

    /// Base64url-encoded public key bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Base64url-encoded private key bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Declared algorithm hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Jwk {
    /// Parses a JWK from its JSON object representation, dispatching on
    /// `kty`.
    pub fn from_value(value: Value) -> KeyResult<Self> {
        let kty = value
            .get("kty")
            .and_then(Value::as_str)
            .ok_or(KeyError::MissingComponent("kty"))?
            .to_string();

        match kty.as_str() {
            "EC" => Ok(Jwk::Ec(serde_json::from_value(value)?)),
            "RSA" => Ok(Jwk::Rsa(serde_json::from_value(value)?)),
            "OKP" => Ok(Jwk::Okp(serde_json::from_value(value)?)),
            other => Err(KeyError::UnsupportedKeyType(other.to_string())),
        }
    }

    /// Parses a JWK from base64url-encoded JSON text, the form encoded key
    /// material is supplied in.
    pub fn from_base64url(text: &str) -> KeyResult<Self> {
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(text.as_bytes())?;
        let value: Value = serde_json::from_slice(&decoded)?;
        Self::from_value(value)
    }

    /// Returns the key identifier, if the key carries one.
    pub fn kid(&self) -> Option<&str> {
        match self {
            Jwk::Ec(jwk) => jwk.kid.as_deref(),
            Jwk::Rsa(jwk) => jwk.kid.as_deref(),
            Jwk::Okp(jwk) => jwk.kid.as_deref(),
        }
    }

    /// The canonical signing algorithm for this key: EC keys by their curve,
    /// RSA keys by their declared algorithm, edwards keys always EdDSA.
    pub fn canonical_alg(&self) -> KeyResult<JwsAlgorithm> {
        match self {
            Jwk::Ec(jwk) => Ok(jwk.curve()?.algorithm()),
            Jwk::Rsa(jwk) => jwk.algorithm(),
            Jwk::Okp(jwk) => {
                jwk.ensure_ed25519()?;
                Ok(JwsAlgorithm::EdDSA)
            }
        }
    }

    /// Derives the parameters needed to import this key into a usable
    /// signing or verifying key.
    pub fn import_params(&self) -> KeyResult<ImportParams> {
        self.canonical_alg()?.import_params()
    }

    /// Resolves the per-call signing parameters for `alg` against this key,
    /// rejecting algorithm families the key cannot serve.
    pub fn signing_params(&self, alg: JwsAlgorithm) -> KeyResult<SigningParams> {
        match self {
            Jwk::Ec(_) => match alg {
                JwsAlgorithm::ES256 | JwsAlgorithm::ES384 | JwsAlgorithm::ES512 => {
                    alg.signing_params()
                }
                other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
            },
            Jwk::Rsa(_) => match alg {
                JwsAlgorithm::RS256 | JwsAlgorithm::RS384 | JwsAlgorithm::RS512 => {
                    alg.signing_params()
                }
                other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
            },
            Jwk::Okp(jwk) => {
                jwk.ensure_ed25519()?;
                JwsAlgorithm::EdDSA.signing_params()
            }
        }
    }
}

impl EcJwk {
    /// Parses the `crv` component.
    pub fn curve(&self) -> KeyResult<EcCurve> {
        self.crv.parse()
    }
}

impl RsaJwk {
    /// The algorithm declared on the key.
    pub fn algorithm(&self) -> KeyResult<JwsAlgorithm> {
        match self.alg.as_deref() {
            Some("RS256") => Ok(JwsAlgorithm::RS256),
            Some("RS384") => Ok(JwsAlgorithm::RS384),
            Some("RS512") => Ok(JwsAlgorithm::RS512),
            Some(other) => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
            None => Err(KeyError::MissingComponent("alg")),
        }
    }
}

impl OkpJwk {
    /// Checks the declared edwards curve is the supported one.
    pub fn ensure_ed25519(&self) -> KeyResult<()> {
        if self.crv == "Ed25519" {
            Ok(())
        } else {
            Err(KeyError::UnsupportedCurve(self.crv.clone()))
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Decodes a base64url key component into raw bytes.
pub(crate) fn decode_component(text: &str) -> KeyResult<Vec<u8>> {
    Ok(BASE64_URL_SAFE_NO_PAD.decode(text.as_bytes())?)
}

/// Returns a required component or the error naming it.
pub(crate) fn require_component<'a>(
    component: Option<&'a String>,
    name: &'static str,
) -> KeyResult<&'a str> {
    component
        .map(String::as_str)
        .ok_or(KeyError::MissingComponent(name))
}

/// Left-pads a big-endian component to exactly `size` bytes.
pub(crate) fn fixed_width(
    component: &'static str,
    bytes: Vec<u8>,
    size: usize,
) -> KeyResult<Vec<u8>> {
    if bytes.len() > size {
        return Err(KeyError::InvalidComponentLength {
            component,
            len: bytes.len(),
        });
    }

    let mut padded = vec![0u8; size - bytes.len()];
    padded.extend_from_slice(&bytes);
    Ok(padded)
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Serialize for Jwk {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let (kty, inner) = match self {
            Jwk::Ec(jwk) => ("EC", serde_json::to_value(jwk)),
            Jwk::Rsa(jwk) => ("RSA", serde_json::to_value(jwk)),
            Jwk::Okp(jwk) => ("OKP", serde_json::to_value(jwk)),
        };

        let mut value = inner.map_err(serde::ser::Error::custom)?;
        if let Value::Object(map) = &mut value {
            map.insert("kty".to_string(), Value::String(kty.to_string()));
        }

        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Jwk {
    fn deserialize<D>(deserializer: D) -> Result<Jwk, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Jwk::from_value(value).map_err(serde::de::Error::custom)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_jwk_from_encoded_material() -> anyhow::Result<()> {
        let encoded = include_str!("../fixtures/rsa_private_jwk.b64").trim();
        let jwk = Jwk::from_base64url(encoded)?;

        assert_eq!(jwk.kid(), Some("cXshVNwSvDZ8"));
        assert_eq!(jwk.canonical_alg()?, JwsAlgorithm::RS256);
        assert!(matches!(
            jwk.import_params()?,
            ImportParams::RsaPkcs1 {
                hash: crate::HashAlgorithm::Sha256
            }
        ));

        Ok(())
    }

    #[test_log::test]
    fn test_jwk_serde_round_trip() -> anyhow::Result<()> {
        let jwk = Jwk::Okp(OkpJwk {
            crv: "Ed25519".to_string(),
            x: Some("9fLB0u10xCVlTxAZyAgpyMtD1dl2P9gjBUYiTDt9O-c".to_string()),
            d: None,
            kid: Some("k1".to_string()),
            alg: None,
        });

        let serialized = serde_json::to_string(&jwk)?;
        tracing::debug!(?serialized);
        assert!(serialized.contains(r#""kty":"OKP""#));

        let deserialized: Jwk = serde_json::from_str(&serialized)?;
        assert_eq!(deserialized, jwk);

        Ok(())
    }

    #[test_log::test]
    fn test_jwk_rejects_unknown_key_type() {
        let value = serde_json::json!({ "kty": "oct", "k": "AQID" });
        assert!(matches!(
            Jwk::from_value(value),
            Err(KeyError::UnsupportedKeyType(kty)) if kty == "oct"
        ));

        let value = serde_json::json!({ "use": "sig" });
        assert!(matches!(
            Jwk::from_value(value),
            Err(KeyError::MissingComponent("kty"))
        ));
    }

    #[test_log::test]
    fn test_ec_curve_resolution() -> anyhow::Result<()> {
        let jwk = Jwk::Ec(EcJwk {
            crv: "P-384".to_string(),
            x: None,
            y: None,
            d: None,
            kid: None,
            alg: None,
        });

        assert_eq!(jwk.canonical_alg()?, JwsAlgorithm::ES384);
        assert!(matches!(
            jwk.signing_params(JwsAlgorithm::RS256),
            Err(KeyError::UnsupportedAlgorithm(_))
        ));

        let jwk = Jwk::Ec(EcJwk {
            crv: "secp256k1".to_string(),
            x: None,
            y: None,
            d: None,
            kid: None,
            alg: None,
        });
        assert!(matches!(
            jwk.canonical_alg(),
            Err(KeyError::UnsupportedCurve(crv)) if crv == "secp256k1"
        ));

        Ok(())
    }

    #[test_log::test]
    fn test_okp_curve_validation() {
        let jwk = Jwk::Okp(OkpJwk {
            crv: "Ed448".to_string(),
            x: None,
            d: None,
            kid: None,
            alg: None,
        });

        assert!(matches!(
            jwk.canonical_alg(),
            Err(KeyError::UnsupportedCurve(crv)) if crv == "Ed448"
        ));
    }

    #[test_log::test]
    fn test_rsa_alg_required() {
        let jwk = Jwk::Rsa(RsaJwk {
            n: Some("AQAB".to_string()),
            e: Some("AQAB".to_string()),
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            kid: None,
            alg: None,
        });
        assert!(matches!(
            jwk.canonical_alg(),
            Err(KeyError::MissingComponent("alg"))
        ));

        let jwk = Jwk::Rsa(RsaJwk {
            alg: Some("PS256".to_string()),
            n: None,
            e: None,
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            kid: None,
        });
        assert!(matches!(
            jwk.canonical_alg(),
            Err(KeyError::UnsupportedAlgorithm(alg)) if alg == "PS256"
        ));
    }

    #[test_log::test]
    fn test_fixed_width_padding() -> anyhow::Result<()> {
        assert_eq!(fixed_width("x", vec![1, 2], 4)?, vec![0, 0, 1, 2]);
        assert!(matches!(
            fixed_width("x", vec![1, 2, 3], 2),
            Err(KeyError::InvalidComponentLength { len: 3, .. })
        ));

        Ok(())
    }
}
