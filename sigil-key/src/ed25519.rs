use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::{
    jwk::{decode_component, require_component},
    JwsAlgName, JwsAlgorithm, KeyResult, OkpJwk, Sign, Verify,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An [`ed25519`][ref] signing key.
///
/// [ref]: https://en.wikipedia.org/wiki/EdDSA
pub type Ed25519SigningKey = SigningKey;

/// An [`ed25519`][ref] verifying key.
///
/// [ref]: https://en.wikipedia.org/wiki/EdDSA
pub type Ed25519VerifyingKey = VerifyingKey;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Imports an Ed25519 signing key from the private component of an edwards
/// JWK.
pub(crate) fn import_signing_key(jwk: &OkpJwk) -> KeyResult<SigningKey> {
    jwk.ensure_ed25519()?;
    let bytes = decode_component(require_component(jwk.d.as_ref(), "d")?)?;
    Ok(SigningKey::try_from(bytes.as_slice())?)
}

/// Imports an Ed25519 verifying key from the public component of an edwards
/// JWK.
pub(crate) fn import_verifying_key(jwk: &OkpJwk) -> KeyResult<VerifyingKey> {
    jwk.ensure_ed25519()?;
    let bytes = decode_component(require_component(jwk.x.as_ref(), "x")?)?;
    Ok(VerifyingKey::try_from(bytes.as_slice())?)
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Verify for VerifyingKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        self.verify_strict(data, &Signature::try_from(signature)?)
            .map_err(Into::into)
    }
}

impl Verify for SigningKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        Verify::verify(&self.verifying_key(), data, signature)
    }
}

impl Sign for SigningKey {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        let signature = self.try_sign(data)?;
        Ok(signature.to_vec())
    }
}

impl JwsAlgName for VerifyingKey {
    fn alg(&self) -> JwsAlgorithm {
        JwsAlgorithm::EdDSA
    }
}

impl JwsAlgName for SigningKey {
    fn alg(&self) -> JwsAlgorithm {
        JwsAlgorithm::EdDSA
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
