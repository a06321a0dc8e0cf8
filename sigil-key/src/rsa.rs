use rsa::{
    pkcs1v15,
    signature::{SignatureEncoding, Signer, Verifier},
    BigUint, RsaPrivateKey, RsaPublicKey,
};
use sha2::{Sha256, Sha384, Sha512};

use crate::{
    jwk::{decode_component, require_component},
    HashAlgorithm, JwsAlgName, JwsAlgorithm, KeyError, KeyResult, RsaJwk, Sign, Verify,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An RSA signing key bound to the hash its JWK declared.
#[derive(Debug, Clone)]
pub struct RsaSigningKey {
    key: RsaPrivateKey,
    hash: HashAlgorithm,
}

/// An RSA verifying key bound to the hash its JWK declared.
#[derive(Debug, Clone)]
pub struct RsaVerifyingKey {
    key: RsaPublicKey,
    hash: HashAlgorithm,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RsaSigningKey {
    /// Imports a private RSA key from the JWK components `n`, `e`, `d`, `p`
    /// and `q`.
    pub fn import(jwk: &RsaJwk) -> KeyResult<Self> {
        let hash = declared_hash(jwk)?;
        let key = RsaPrivateKey::from_components(
            component_uint(jwk.n.as_ref(), "n")?,
            component_uint(jwk.e.as_ref(), "e")?,
            component_uint(jwk.d.as_ref(), "d")?,
            vec![
                component_uint(jwk.p.as_ref(), "p")?,
                component_uint(jwk.q.as_ref(), "q")?,
            ],
        )?;

        Ok(Self { key, hash })
    }
}

impl RsaVerifyingKey {
    /// Imports a public RSA key from the JWK components `n` and `e`.
    pub fn import(jwk: &RsaJwk) -> KeyResult<Self> {
        let hash = declared_hash(jwk)?;
        let key = RsaPublicKey::new(
            component_uint(jwk.n.as_ref(), "n")?,
            component_uint(jwk.e.as_ref(), "e")?,
        )?;

        Ok(Self { key, hash })
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn declared_hash(jwk: &RsaJwk) -> KeyResult<HashAlgorithm> {
    match jwk.algorithm()? {
        JwsAlgorithm::RS256 => Ok(HashAlgorithm::Sha256),
        JwsAlgorithm::RS384 => Ok(HashAlgorithm::Sha384),
        JwsAlgorithm::RS512 => Ok(HashAlgorithm::Sha512),
        other => Err(KeyError::UnsupportedAlgorithm(other.to_string())),
    }
}

fn component_uint(component: Option<&String>, name: &'static str) -> KeyResult<BigUint> {
    let bytes = decode_component(require_component(component, name)?)?;
    Ok(BigUint::from_bytes_be(&bytes))
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Sign for RsaSigningKey {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        let signature = match self.hash {
            HashAlgorithm::Sha256 => pkcs1v15::SigningKey::<Sha256>::new(self.key.clone())
                .try_sign(data)?
                .to_vec(),
            HashAlgorithm::Sha384 => pkcs1v15::SigningKey::<Sha384>::new(self.key.clone())
                .try_sign(data)?
                .to_vec(),
            HashAlgorithm::Sha512 => pkcs1v15::SigningKey::<Sha512>::new(self.key.clone())
                .try_sign(data)?
                .to_vec(),
        };

        Ok(signature)
    }
}

impl Verify for RsaSigningKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        let verifying_key = RsaVerifyingKey {
            key: RsaPublicKey::from(&self.key),
            hash: self.hash,
        };
        verifying_key.verify(data, signature)
    }
}

impl Verify for RsaVerifyingKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> KeyResult<()> {
        let signature = pkcs1v15::Signature::try_from(signature)?;
        match self.hash {
            HashAlgorithm::Sha256 => {
                pkcs1v15::VerifyingKey::<Sha256>::new(self.key.clone()).verify(data, &signature)
            }
            HashAlgorithm::Sha384 => {
                pkcs1v15::VerifyingKey::<Sha384>::new(self.key.clone()).verify(data, &signature)
            }
            HashAlgorithm::Sha512 => {
                pkcs1v15::VerifyingKey::<Sha512>::new(self.key.clone()).verify(data, &signature)
            }
        }
        .map_err(Into::into)
    }
}

impl JwsAlgName for RsaSigningKey {
    fn alg(&self) -> JwsAlgorithm {
        rsa_alg(self.hash)
    }
}

impl JwsAlgName for RsaVerifyingKey {
    fn alg(&self) -> JwsAlgorithm {
        rsa_alg(self.hash)
    }
}

fn rsa_alg(hash: HashAlgorithm) -> JwsAlgorithm {
    match hash {
        HashAlgorithm::Sha256 => JwsAlgorithm::RS256,
        HashAlgorithm::Sha384 => JwsAlgorithm::RS384,
        HashAlgorithm::Sha512 => JwsAlgorithm::RS512,
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::Jwk;

    use super::*;

    fn fixture_jwk() -> RsaJwk {
        let encoded = include_str!("../fixtures/rsa_private_jwk.b64").trim();
        match Jwk::from_base64url(encoded).unwrap() {
            Jwk::Rsa(jwk) => jwk,
            other => panic!("fixture is not an RSA key: {other:?}"),
        }
    }

    #[test_log::test]
    fn test_rsa_import_sign_and_verify() -> anyhow::Result<()> {
        let jwk = fixture_jwk();

        let signing_key = RsaSigningKey::import(&jwk)?;
        let verifying_key = RsaVerifyingKey::import(&jwk)?;

        assert_eq!(signing_key.alg(), JwsAlgorithm::RS256);
        assert_eq!(verifying_key.alg(), JwsAlgorithm::RS256);

        let data = b"signed bytes";
        let signature = signing_key.sign(data)?;
        verifying_key.verify(data, &signature)?;

        assert!(verifying_key.verify(b"other bytes", &signature).is_err());

        Ok(())
    }

    #[test_log::test]
    fn test_rsa_import_requires_private_components() {
        let jwk = RsaJwk {
            d: None,
            p: None,
            q: None,
            ..fixture_jwk()
        };

        assert!(matches!(
            RsaSigningKey::import(&jwk),
            Err(KeyError::MissingComponent("d"))
        ));

        // The public half only needs n and e.
        assert!(RsaVerifyingKey::import(&jwk).is_ok());
    }
}
