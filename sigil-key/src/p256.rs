use p256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};

use crate::{
    jwk::{decode_component, fixed_width, require_component},
    EcCurve, EcJwk, JwsAlgName, JwsAlgorithm, KeyResult, Sign, Verify,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A [`NIST P-256`][ref] ECDSA signing key.
///
/// [ref]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
pub type P256SigningKey = SigningKey;

/// A [`NIST P-256`][ref] ECDSA verifying key.
///
/// [ref]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
pub type P256VerifyingKey = VerifyingKey;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Imports a P-256 signing key from the private scalar of an EC JWK.
pub(crate) fn import_signing_key(jwk: &EcJwk) -> KeyResult<SigningKey> {
    let scalar = fixed_width(
        "d",
        decode_component(require_component(jwk.d.as_ref(), "d")?)?,
        EcCurve::P256.field_size(),
    )?;
    Ok(SigningKey::from_slice(&scalar)?)
}

/// Imports a P-256 verifying key from the affine coordinates of an EC JWK,
/// assembling the [`Elliptic-Curve-Point-to-Octet-String` encoding][ref]
/// described in SEC 1: Elliptic Curve Cryptography (Version 2.0).
///
/// [ref]: http://www.secg.org/sec1-v2.pdf
pub(crate) fn import_verifying_key(jwk: &EcJwk) -> KeyResult<VerifyingKey> {
    let size = EcCurve::P256.field_size();
    let x = fixed_width(
        "x",
        decode_component(require_component(jwk.x.as_ref(), "x")?)?,
        size,
    )?;
    let y = fixed_width(
        "y",
        decode_component(require_component(jwk.y.as_ref(), "y")?)?,
        size,
    )?;

    let mut sec1 = Vec::with_capacity(1 + 2 * size);
    sec1.push(0x04);
    sec1.extend_from_slice(&x);
    sec1.extend_from_slice(&y);

    Ok(VerifyingKey::from_sec1_bytes(&sec1)?)
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Verify for VerifyingKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        let signature = Signature::try_from(signature)?;
        Verifier::verify(self, data, &signature).map_err(Into::into)
    }
}

impl Verify for SigningKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        Verify::verify(self.verifying_key(), data, signature)
    }
}

impl Sign for SigningKey {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        let signature: Signature = self.try_sign(data)?;
        Ok(signature.to_vec())
    }
}

impl JwsAlgName for VerifyingKey {
    fn alg(&self) -> JwsAlgorithm {
        JwsAlgorithm::ES256
    }
}

impl JwsAlgName for SigningKey {
    fn alg(&self) -> JwsAlgorithm {
        JwsAlgorithm::ES256
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
