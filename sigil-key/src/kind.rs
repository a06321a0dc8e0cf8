use crate::{
    ed25519, p256, p384, p521, Ed25519SigningKey, Ed25519VerifyingKey, EcCurve, ImportParams, Jwk,
    JwsAlgName, JwsAlgorithm, KeyError, KeyResult, P256SigningKey, P256VerifyingKey,
    P384SigningKey, P384VerifyingKey, P521SigningKey, P521VerifyingKey, RsaSigningKey,
    RsaVerifyingKey, Sign, Verify,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A sign-scoped key handle imported from caller key material.
///
/// Import happens fresh on every call; nothing is cached or shared between
/// calls.
#[derive(Clone)]
pub enum WrappedSigningKey {
    /// An Ed25519 signing key.
    Ed25519(Ed25519SigningKey),

    /// A P-256 ECDSA signing key.
    P256(P256SigningKey),

    /// A P-384 ECDSA signing key.
    P384(P384SigningKey),

    /// A P-521 ECDSA signing key.
    P521(P521SigningKey),

    /// An RSA signing key.
    Rsa(RsaSigningKey),
}

/// A verify-scoped key handle imported from caller key material.
#[derive(Clone)]
pub enum WrappedVerifyingKey {
    /// An Ed25519 verifying key.
    Ed25519(Ed25519VerifyingKey),

    /// A P-256 ECDSA verifying key.
    P256(P256VerifyingKey),

    /// A P-384 ECDSA verifying key.
    P384(P384VerifyingKey),

    /// A P-521 ECDSA verifying key.
    P521(P521VerifyingKey),

    /// An RSA verifying key.
    Rsa(RsaVerifyingKey),
}

impl std::fmt::Debug for WrappedSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrappedSigningKey::Ed25519(key) => f.debug_tuple("Ed25519").field(key).finish(),
            WrappedSigningKey::P256(key) => f.debug_tuple("P256").field(key).finish(),
            WrappedSigningKey::P384(key) => f.debug_tuple("P384").field(key).finish(),
            // `p521`'s `SigningKey` does not implement `Debug`, so render the
            // variant without the inner key material.
            WrappedSigningKey::P521(_) => f.debug_tuple("P521").finish(),
            WrappedSigningKey::Rsa(key) => f.debug_tuple("Rsa").field(key).finish(),
        }
    }
}

impl std::fmt::Debug for WrappedVerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrappedVerifyingKey::Ed25519(key) => f.debug_tuple("Ed25519").field(key).finish(),
            WrappedVerifyingKey::P256(key) => f.debug_tuple("P256").field(key).finish(),
            WrappedVerifyingKey::P384(key) => f.debug_tuple("P384").field(key).finish(),
            // `p521`'s `VerifyingKey` does not implement `Debug`, so render the
            // variant without the inner key material.
            WrappedVerifyingKey::P521(_) => f.debug_tuple("P521").finish(),
            WrappedVerifyingKey::Rsa(key) => f.debug_tuple("Rsa").field(key).finish(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl WrappedSigningKey {
    /// Imports a signing key from a JWK, selecting the family from the key's
    /// import parameters.
    pub fn from_jwk(jwk: &Jwk) -> KeyResult<Self> {
        match (jwk.import_params()?, jwk) {
            (
                ImportParams::Ecdsa {
                    curve: EcCurve::P256,
                },
                Jwk::Ec(jwk),
            ) => Ok(Self::P256(p256::import_signing_key(jwk)?)),
            (
                ImportParams::Ecdsa {
                    curve: EcCurve::P384,
                },
                Jwk::Ec(jwk),
            ) => Ok(Self::P384(p384::import_signing_key(jwk)?)),
            (
                ImportParams::Ecdsa {
                    curve: EcCurve::P521,
                },
                Jwk::Ec(jwk),
            ) => Ok(Self::P521(p521::import_signing_key(jwk)?)),
            (ImportParams::RsaPkcs1 { .. }, Jwk::Rsa(jwk)) => {
                Ok(Self::Rsa(RsaSigningKey::import(jwk)?))
            }
            (ImportParams::Ed25519, Jwk::Okp(jwk)) => {
                Ok(Self::Ed25519(ed25519::import_signing_key(jwk)?))
            }
            (params, _) => Err(KeyError::UnsupportedAlgorithm(format!("{params:?}"))),
        }
    }
}

impl WrappedVerifyingKey {
    /// Imports a verifying key from a JWK, selecting the family from the
    /// key's import parameters.
    pub fn from_jwk(jwk: &Jwk) -> KeyResult<Self> {
        match (jwk.import_params()?, jwk) {
            (
                ImportParams::Ecdsa {
                    curve: EcCurve::P256,
                },
                Jwk::Ec(jwk),
            ) => Ok(Self::P256(p256::import_verifying_key(jwk)?)),
            (
                ImportParams::Ecdsa {
                    curve: EcCurve::P384,
                },
                Jwk::Ec(jwk),
            ) => Ok(Self::P384(p384::import_verifying_key(jwk)?)),
            (
                ImportParams::Ecdsa {
                    curve: EcCurve::P521,
                },
                Jwk::Ec(jwk),
            ) => Ok(Self::P521(p521::import_verifying_key(jwk)?)),
            (ImportParams::RsaPkcs1 { .. }, Jwk::Rsa(jwk)) => {
                Ok(Self::Rsa(RsaVerifyingKey::import(jwk)?))
            }
            (ImportParams::Ed25519, Jwk::Okp(jwk)) => {
                Ok(Self::Ed25519(ed25519::import_verifying_key(jwk)?))
            }
            (params, _) => Err(KeyError::UnsupportedAlgorithm(format!("{params:?}"))),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Sign for WrappedSigningKey {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        match self {
            WrappedSigningKey::Ed25519(key) => Sign::sign(key, data),
            WrappedSigningKey::P256(key) => Sign::sign(key, data),
            WrappedSigningKey::P384(key) => Sign::sign(key, data),
            WrappedSigningKey::P521(key) => Sign::sign(key, data),
            WrappedSigningKey::Rsa(key) => Sign::sign(key, data),
        }
    }
}

impl Verify for WrappedSigningKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        match self {
            WrappedSigningKey::Ed25519(key) => Verify::verify(key, data, signature),
            WrappedSigningKey::P256(key) => Verify::verify(key, data, signature),
            WrappedSigningKey::P384(key) => Verify::verify(key, data, signature),
            WrappedSigningKey::P521(key) => Verify::verify(key, data, signature),
            WrappedSigningKey::Rsa(key) => Verify::verify(key, data, signature),
        }
    }
}

impl JwsAlgName for WrappedSigningKey {
    fn alg(&self) -> JwsAlgorithm {
        match self {
            WrappedSigningKey::Ed25519(key) => key.alg(),
            WrappedSigningKey::P256(key) => key.alg(),
            WrappedSigningKey::P384(key) => key.alg(),
            WrappedSigningKey::P521(key) => key.alg(),
            WrappedSigningKey::Rsa(key) => key.alg(),
        }
    }
}

impl Verify for WrappedVerifyingKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        match self {
            WrappedVerifyingKey::Ed25519(key) => Verify::verify(key, data, signature),
            WrappedVerifyingKey::P256(key) => Verify::verify(key, data, signature),
            WrappedVerifyingKey::P384(key) => Verify::verify(key, data, signature),
            WrappedVerifyingKey::P521(key) => Verify::verify(key, data, signature),
            WrappedVerifyingKey::Rsa(key) => Verify::verify(key, data, signature),
        }
    }
}

impl JwsAlgName for WrappedVerifyingKey {
    fn alg(&self) -> JwsAlgorithm {
        match self {
            WrappedVerifyingKey::Ed25519(key) => key.alg(),
            WrappedVerifyingKey::P256(key) => key.alg(),
            WrappedVerifyingKey::P384(key) => key.alg(),
            WrappedVerifyingKey::P521(key) => key.alg(),
            WrappedVerifyingKey::Rsa(key) => key.alg(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
