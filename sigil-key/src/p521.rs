use p521::ecdsa::{
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

/// A [`NIST P-521`][ref] ECDSA signing key.
///
/// [ref]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
pub type P521SigningKey = SigningKey;

/// A [`NIST P-521`][ref] ECDSA verifying key.
///
/// [ref]: https://en.wikipedia.org/wiki/Elliptic_Curve_Digital_Signature_Algorithm
pub type P521VerifyingKey = VerifyingKey;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Imports a P-521 signing key from the private scalar of an EC JWK.
pub(crate) fn import_signing_key(jwk: &EcJwk) -> KeyResult<SigningKey> {
    let scalar = fixed_width(
        "d",
        decode_component(require_component(jwk.d.as_ref(), "d")?)?,
        EcCurve::P521.field_size(),
    )?;
    Ok(SigningKey::from_slice(&scalar)?)
}

/// Imports a P-521 verifying key from the affine coordinates of an EC JWK.
pub(crate) fn import_verifying_key(jwk: &EcJwk) -> KeyResult<VerifyingKey> {
    let size = EcCurve::P521.field_size();
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
        Verify::verify(&VerifyingKey::from(self), data, signature)
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
        JwsAlgorithm::ES512
    }
}

impl JwsAlgName for SigningKey {
    fn alg(&self) -> JwsAlgorithm {
        JwsAlgorithm::ES512
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
    use p521::elliptic_curve::sec1::ToEncodedPoint;

    use super::*;

    #[test_log::test]
    fn test_p521_import_sign_and_verify() -> anyhow::Result<()> {
        let generated = SigningKey::random(&mut rand::thread_rng());
        let point = VerifyingKey::from(&generated).to_encoded_point(false);

        let jwk = EcJwk {
            crv: "P-521".to_string(),
            x: Some(BASE64_URL_SAFE_NO_PAD.encode(point.x().unwrap().as_slice())),
            y: Some(BASE64_URL_SAFE_NO_PAD.encode(point.y().unwrap().as_slice())),
            d: Some(BASE64_URL_SAFE_NO_PAD.encode(generated.to_bytes().as_slice())),
            kid: None,
            alg: None,
        };

        let signing_key = import_signing_key(&jwk)?;
        let verifying_key = import_verifying_key(&jwk)?;

        let data = b"signed bytes";
        let signature = Sign::sign(&signing_key, data)?;
        Verify::verify(&verifying_key, data, &signature)?;

        Ok(())
    }
}
