use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{KeyError, KeyResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// JSON Web Signature (JWS) algorithm identifiers accepted in token headers.
///
/// The `none` sentinel is carried as an explicit variant so hostile tokens
/// stay inspectable after decoding; every signing and verification path
/// rejects it.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum JwsAlgorithm {
    /// EdDSA over Ed25519.
    #[serde(rename = "EdDSA")]
    EdDSA,

    /// ECDSA using P-256 and SHA-256.
    #[serde(rename = "ES256")]
    ES256,

    /// ECDSA using P-384 and SHA-384.
    #[serde(rename = "ES384")]
    ES384,

    /// ECDSA using P-521 and SHA-512.
    #[serde(rename = "ES512")]
    ES512,

    /// HMAC using SHA-256.
    #[serde(rename = "HS256")]
    HS256,

    /// HMAC using SHA-384.
    #[serde(rename = "HS384")]
    HS384,

    /// HMAC using SHA-512.
    #[serde(rename = "HS512")]
    HS512,

    /// RSASSA-PKCS1-v1_5 using SHA-256.
    #[serde(rename = "RS256")]
    RS256,

    /// RSASSA-PKCS1-v1_5 using SHA-384.
    #[serde(rename = "RS384")]
    RS384,

    /// RSASSA-PKCS1-v1_5 using SHA-512.
    #[serde(rename = "RS512")]
    RS512,

    /// The unsecured-token sentinel.
    #[serde(rename = "none")]
    None,
}

/// Hash function selector carried in import and signing parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256.
    Sha256,

    /// SHA-384.
    Sha384,

    /// SHA-512.
    Sha512,
}

/// Elliptic curves supported for `EC` keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EcCurve {
    /// NIST P-256.
    P256,

    /// NIST P-384.
    P384,

    /// NIST P-521.
    P521,
}

/// Parameters used once, to import key material into a usable key.
///
/// Import and signing parameter shapes differ for the EC family: import
/// needs the curve, signing needs the hash.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImportParams {
    /// ECDSA import selects the curve the key lives on.
    Ecdsa {
        /// The curve of the key.
        curve: EcCurve,
    },

    /// RSASSA-PKCS1-v1_5 import binds the hash to the key.
    RsaPkcs1 {
        /// The hash bound to the key.
        hash: HashAlgorithm,
    },

    /// HMAC import binds the hash to the key.
    Hmac {
        /// The hash bound to the key.
        hash: HashAlgorithm,
    },

    /// Ed25519 import takes no further parameters.
    Ed25519,
}

/// Parameters used on every sign or verify call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SigningParams {
    /// ECDSA signing selects the hash.
    Ecdsa {
        /// The hash applied to the signed bytes.
        hash: HashAlgorithm,
    },

    /// RSASSA-PKCS1-v1_5 signing selects the hash.
    RsaPkcs1 {
        /// The hash applied to the signed bytes.
        hash: HashAlgorithm,
    },

    /// HMAC signing selects the hash.
    Hmac {
        /// The hash applied to the signed bytes.
        hash: HashAlgorithm,
    },

    /// Ed25519 signing takes no further parameters.
    Ed25519,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwsAlgorithm {
    /// Returns the parameters used once to import key material for this
    /// algorithm.
    pub fn import_params(&self) -> KeyResult<ImportParams> {
        let params = match self {
            JwsAlgorithm::ES256 => ImportParams::Ecdsa {
                curve: EcCurve::P256,
            },
            JwsAlgorithm::ES384 => ImportParams::Ecdsa {
                curve: EcCurve::P384,
            },
            JwsAlgorithm::ES512 => ImportParams::Ecdsa {
                curve: EcCurve::P521,
            },
            JwsAlgorithm::HS256 => ImportParams::Hmac {
                hash: HashAlgorithm::Sha256,
            },
            JwsAlgorithm::HS384 => ImportParams::Hmac {
                hash: HashAlgorithm::Sha384,
            },
            JwsAlgorithm::HS512 => ImportParams::Hmac {
                hash: HashAlgorithm::Sha512,
            },
            JwsAlgorithm::RS256 => ImportParams::RsaPkcs1 {
                hash: HashAlgorithm::Sha256,
            },
            JwsAlgorithm::RS384 => ImportParams::RsaPkcs1 {
                hash: HashAlgorithm::Sha384,
            },
            JwsAlgorithm::RS512 => ImportParams::RsaPkcs1 {
                hash: HashAlgorithm::Sha512,
            },
            JwsAlgorithm::EdDSA => ImportParams::Ed25519,
            JwsAlgorithm::None => return Err(KeyError::NoneAlgorithm),
        };

        Ok(params)
    }

    /// Returns the parameters used on every sign or verify call for this
    /// algorithm.
    pub fn signing_params(&self) -> KeyResult<SigningParams> {
        let params = match self {
            JwsAlgorithm::ES256 => SigningParams::Ecdsa {
                hash: HashAlgorithm::Sha256,
            },
            JwsAlgorithm::ES384 => SigningParams::Ecdsa {
                hash: HashAlgorithm::Sha384,
            },
            JwsAlgorithm::ES512 => SigningParams::Ecdsa {
                hash: HashAlgorithm::Sha512,
            },
            JwsAlgorithm::HS256 => SigningParams::Hmac {
                hash: HashAlgorithm::Sha256,
            },
            JwsAlgorithm::HS384 => SigningParams::Hmac {
                hash: HashAlgorithm::Sha384,
            },
            JwsAlgorithm::HS512 => SigningParams::Hmac {
                hash: HashAlgorithm::Sha512,
            },
            JwsAlgorithm::RS256 => SigningParams::RsaPkcs1 {
                hash: HashAlgorithm::Sha256,
            },
            JwsAlgorithm::RS384 => SigningParams::RsaPkcs1 {
                hash: HashAlgorithm::Sha384,
            },
            JwsAlgorithm::RS512 => SigningParams::RsaPkcs1 {
                hash: HashAlgorithm::Sha512,
            },
            JwsAlgorithm::EdDSA => SigningParams::Ed25519,
            JwsAlgorithm::None => return Err(KeyError::NoneAlgorithm),
        };

        Ok(params)
    }
}

impl EcCurve {
    /// The JWS algorithm canonically paired with this curve.
    pub fn algorithm(&self) -> JwsAlgorithm {
        match self {
            EcCurve::P256 => JwsAlgorithm::ES256,
            EcCurve::P384 => JwsAlgorithm::ES384,
            EcCurve::P521 => JwsAlgorithm::ES512,
        }
    }

    /// Width of a field element on this curve, in bytes.
    pub fn field_size(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwsAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JwsAlgorithm::EdDSA => "EdDSA",
            JwsAlgorithm::ES256 => "ES256",
            JwsAlgorithm::ES384 => "ES384",
            JwsAlgorithm::ES512 => "ES512",
            JwsAlgorithm::HS256 => "HS256",
            JwsAlgorithm::HS384 => "HS384",
            JwsAlgorithm::HS512 => "HS512",
            JwsAlgorithm::RS256 => "RS256",
            JwsAlgorithm::RS384 => "RS384",
            JwsAlgorithm::RS512 => "RS512",
            JwsAlgorithm::None => "none",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for JwsAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EdDSA" => Ok(JwsAlgorithm::EdDSA),
            "ES256" => Ok(JwsAlgorithm::ES256),
            "ES384" => Ok(JwsAlgorithm::ES384),
            "ES512" => Ok(JwsAlgorithm::ES512),
            "HS256" => Ok(JwsAlgorithm::HS256),
            "HS384" => Ok(JwsAlgorithm::HS384),
            "HS512" => Ok(JwsAlgorithm::HS512),
            "RS256" => Ok(JwsAlgorithm::RS256),
            "RS384" => Ok(JwsAlgorithm::RS384),
            "RS512" => Ok(JwsAlgorithm::RS512),
            "none" => Ok(JwsAlgorithm::None),
            s => Err(KeyError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        };
        write!(f, "{}", name)
    }
}

impl Display for EcCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EcCurve {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P-256" => Ok(EcCurve::P256),
            "P-384" => Ok(EcCurve::P384),
            "P-521" => Ok(EcCurve::P521),
            s => Err(KeyError::UnsupportedCurve(s.to_string())),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
