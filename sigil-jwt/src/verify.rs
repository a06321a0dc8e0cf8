use std::time::SystemTime;

use sigil_key::{JwsAlgName, JwsAlgorithm, Verify, WrappedVerifyingKey};

use crate::{
    decode_token, sign::unix_secs, JwtClaims, JwtError, JwtHeader, JwtResult, KeyMaterial,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The outcome of a successful verification: the decoded header and claims.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    /// The verified header.
    pub header: JwtHeader,

    /// The verified claims.
    pub payload: JwtClaims,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Verifies a token with the current system time. See [`verify_token_at`].
pub fn verify_token(key: impl Into<KeyMaterial>, token: &str) -> JwtResult<VerifiedToken> {
    verify_token_at(key, token, SystemTime::now())
}

/// Verifies a token at the given time.
///
/// Checks run in a fixed order: structural decode, time-based claims, the
/// unconditional `none`-algorithm rejection, algorithm/key cross-checks, and
/// only then the signature itself. A token that fails the time checks is
/// rejected without any signature work.
pub fn verify_token_at(
    key: impl Into<KeyMaterial>,
    token: &str,
    now: SystemTime,
) -> JwtResult<VerifiedToken> {
    let decoded = decode_token(token)?;

    decoded.payload.validate_time(unix_secs(now))?;

    if decoded.header.alg() == JwsAlgorithm::None {
        return Err(JwtError::NoneAlgorithm);
    }

    let jwk = key.into().resolve()?;

    // Family compatibility between the declared algorithm and the key type,
    // then strict equality with what the imported key actually verifies.
    jwk.signing_params(decoded.header.alg())?;
    let verifying_key = WrappedVerifyingKey::from_jwk(&jwk)?;
    if verifying_key.alg() != decoded.header.alg() {
        return Err(JwtError::AlgorithmMismatch {
            header: decoded.header.alg(),
            key: verifying_key.alg(),
        });
    }

    verifying_key
        .verify(&decoded.signed_data, decoded.signature.as_bytes())
        .map_err(|_| JwtError::SignatureInvalid)?;

    Ok(VerifiedToken {
        header: decoded.header,
        payload: decoded.payload,
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use serde_json::json;
    use sigil_key::{EcJwk, Ed25519SigningKey, Jwk, OkpJwk, P256SigningKey, RsaJwk};

    use crate::{sign_token_at, SignOptions};

    use super::*;

    // The reference scenario: fixed clock, 30 second ttl.
    const NOW_SECS: u64 = 1_609_459_200;

    fn now() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(NOW_SECS)
    }

    fn scenario_claims() -> JwtClaims {
        JwtClaims {
            sub: Some("me".to_string()),
            ..Default::default()
        }
        .with_claim("cap", json!({ "team:123": ["read", "publish"] }))
    }

    fn ed25519_jwk_pair() -> (Jwk, Jwk) {
        let signing_key = Ed25519SigningKey::generate(&mut rand::thread_rng());
        let x = BASE64_URL_SAFE_NO_PAD.encode(signing_key.verifying_key().to_bytes());

        let private = Jwk::Okp(OkpJwk {
            crv: "Ed25519".to_string(),
            x: Some(x.clone()),
            d: Some(BASE64_URL_SAFE_NO_PAD.encode(signing_key.to_bytes())),
            kid: None,
            alg: None,
        });
        let public = Jwk::Okp(OkpJwk {
            crv: "Ed25519".to_string(),
            x: Some(x),
            d: None,
            kid: None,
            alg: None,
        });

        (private, public)
    }

    fn p256_jwk_pair() -> (Jwk, Jwk) {
        let signing_key = P256SigningKey::random(&mut rand::thread_rng());
        let point = signing_key.verifying_key().to_encoded_point(false);
        let x = BASE64_URL_SAFE_NO_PAD.encode(point.x().unwrap().as_slice());
        let y = BASE64_URL_SAFE_NO_PAD.encode(point.y().unwrap().as_slice());

        let private = Jwk::Ec(EcJwk {
            crv: "P-256".to_string(),
            x: Some(x.clone()),
            y: Some(y.clone()),
            d: Some(BASE64_URL_SAFE_NO_PAD.encode(signing_key.to_bytes().as_slice())),
            kid: None,
            alg: None,
        });
        let public = Jwk::Ec(EcJwk {
            crv: "P-256".to_string(),
            x: Some(x),
            y: Some(y),
            d: None,
            kid: None,
            alg: None,
        });

        (private, public)
    }

    fn rsa_fixture() -> (String, Jwk) {
        let encoded = include_str!("../fixtures/rsa_private_jwk.b64")
            .trim()
            .to_string();

        let public = match Jwk::from_base64url(&encoded).unwrap() {
            Jwk::Rsa(jwk) => Jwk::Rsa(RsaJwk {
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
                ..jwk
            }),
            other => panic!("fixture is not an RSA key: {other:?}"),
        };

        (encoded, public)
    }

    fn assert_scenario(verified: &VerifiedToken, alg: JwsAlgorithm, kid: &str) {
        assert_eq!(verified.header.alg(), alg);
        assert_eq!(verified.header.kid(), Some(kid));
        assert_eq!(verified.payload.sub.as_deref(), Some("me"));
        assert_eq!(verified.payload.iat, Some(NOW_SECS));
        assert_eq!(verified.payload.exp, Some(NOW_SECS + 30));
        assert_eq!(
            verified.payload.extra.get("cap"),
            Some(&json!({ "team:123": ["read", "publish"] }))
        );
    }

    #[test_log::test]
    fn test_sign_and_verify_ed25519() -> anyhow::Result<()> {
        let (private, public) = ed25519_jwk_pair();

        let token = sign_token_at(
            &private,
            SignOptions::new("k-ed", scenario_claims()).ttl_secs(30),
            now(),
        )?;
        tracing::debug!(?token);

        let verified = verify_token_at(&public, &token, now())?;
        assert_scenario(&verified, JwsAlgorithm::EdDSA, "k-ed");

        Ok(())
    }

    #[test_log::test]
    fn test_sign_and_verify_p256() -> anyhow::Result<()> {
        let (private, public) = p256_jwk_pair();

        let token = sign_token_at(
            &private,
            SignOptions::new("k-ec", scenario_claims()).ttl_secs(30),
            now(),
        )?;
        tracing::debug!(?token);

        let verified = verify_token_at(&public, &token, now())?;
        assert_scenario(&verified, JwsAlgorithm::ES256, "k-ec");

        Ok(())
    }

    #[test_log::test]
    fn test_sign_and_verify_rsa_from_encoded_material() -> anyhow::Result<()> {
        let (encoded_private, public) = rsa_fixture();

        let token = sign_token_at(
            encoded_private,
            SignOptions::new("k-rsa", scenario_claims()).ttl_secs(30),
            now(),
        )?;
        tracing::debug!(?token);

        let verified = verify_token_at(&public, &token, now())?;
        assert_scenario(&verified, JwsAlgorithm::RS256, "k-rsa");

        Ok(())
    }

    #[test_log::test]
    fn test_caller_supplied_iat_wins() -> anyhow::Result<()> {
        let (private, public) = ed25519_jwk_pair();

        let claims = JwtClaims {
            iat: Some(NOW_SECS - 100),
            ..Default::default()
        };
        let token = sign_token_at(&private, SignOptions::new("k1", claims).ttl_secs(300), now())?;

        let verified = verify_token_at(&public, &token, now())?;
        assert_eq!(verified.payload.iat, Some(NOW_SECS - 100));
        assert_eq!(verified.payload.exp, Some(NOW_SECS + 200));

        Ok(())
    }

    #[test_log::test]
    fn test_expiry_boundary() -> anyhow::Result<()> {
        let (private, public) = ed25519_jwk_pair();

        // ttl 0 puts exp exactly at the verification time.
        let token = sign_token_at(
            &private,
            SignOptions::new("k1", JwtClaims::default()).ttl_secs(0),
            now(),
        )?;
        assert!(matches!(
            verify_token_at(&public, &token, now()),
            Err(JwtError::Expired { exp, now }) if exp == NOW_SECS && now == NOW_SECS
        ));

        let token = sign_token_at(
            &private,
            SignOptions::new("k1", JwtClaims::default()).ttl_secs(1),
            now(),
        )?;
        assert!(verify_token_at(&public, &token, now()).is_ok());

        Ok(())
    }

    #[test_log::test]
    fn test_not_yet_valid_boundary() -> anyhow::Result<()> {
        let (private, public) = ed25519_jwk_pair();

        let claims = JwtClaims {
            nbf: Some(NOW_SECS + 1),
            ..Default::default()
        };
        let token = sign_token_at(&private, SignOptions::new("k1", claims), now())?;
        assert!(matches!(
            verify_token_at(&public, &token, now()),
            Err(JwtError::NotYetValid { nbf, .. }) if nbf == NOW_SECS + 1
        ));

        let claims = JwtClaims {
            nbf: Some(NOW_SECS),
            ..Default::default()
        };
        let token = sign_token_at(&private, SignOptions::new("k1", claims), now())?;
        assert!(verify_token_at(&public, &token, now()).is_ok());

        Ok(())
    }

    #[test_log::test]
    fn test_none_algorithm_is_rejected() -> anyhow::Result<()> {
        let (_, public) = ed25519_jwk_pair();

        // header {"typ":"JWT","alg":"none"} with an empty payload object.
        let token = "eyJ0eXAiOiJKV1QiLCJhbGciOiJub25lIn0.e30.AQIDBAU";
        assert!(matches!(
            verify_token_at(&public, token, now()),
            Err(JwtError::NoneAlgorithm)
        ));

        Ok(())
    }

    #[test_log::test]
    fn test_tampered_payload_fails_signature() -> anyhow::Result<()> {
        let (private, public) = ed25519_jwk_pair();

        let token = sign_token_at(
            &private,
            SignOptions::new("k1", scenario_claims()),
            now(),
        )?;

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = crate::object_to_base64url(&json!({ "sub": "mallory" }))?;
        parts[1] = &forged;
        let forged_token = parts.join(".");

        assert!(matches!(
            verify_token_at(&public, &forged_token, now()),
            Err(JwtError::SignatureInvalid)
        ));

        Ok(())
    }

    #[test_log::test]
    fn test_wrong_key_family_is_rejected() -> anyhow::Result<()> {
        let (private, _) = ed25519_jwk_pair();
        let (_, ec_public) = p256_jwk_pair();

        let token = sign_token_at(&private, SignOptions::new("k1", JwtClaims::default()), now())?;

        // EdDSA header against an EC key fails the family cross-check.
        assert!(matches!(
            verify_token_at(&ec_public, &token, now()),
            Err(JwtError::KeyError(_))
        ));

        Ok(())
    }

    #[test_log::test]
    fn test_declared_alg_must_match_key() -> anyhow::Result<()> {
        let (encoded_private, public) = rsa_fixture();

        let token = sign_token_at(
            encoded_private,
            SignOptions::new("k1", JwtClaims::default()),
            now(),
        )?;

        // Same key material redeclared as RS384 no longer matches the
        // header's RS256.
        let redeclared = match public {
            Jwk::Rsa(jwk) => Jwk::Rsa(RsaJwk {
                alg: Some("RS384".to_string()),
                ..jwk
            }),
            other => panic!("fixture is not an RSA key: {other:?}"),
        };

        assert!(matches!(
            verify_token_at(&redeclared, &token, now()),
            Err(JwtError::AlgorithmMismatch {
                header: JwsAlgorithm::RS256,
                key: JwsAlgorithm::RS384,
            })
        ));

        Ok(())
    }

    #[test_log::test]
    fn test_sign_requires_kid() {
        let (private, _) = ed25519_jwk_pair();

        assert!(matches!(
            sign_token_at(
                &private,
                SignOptions::new("", JwtClaims::default()),
                now()
            ),
            Err(JwtError::MissingKid)
        ));
    }

    #[test_log::test]
    fn test_expiry_checked_before_signature() -> anyhow::Result<()> {
        let (private, public) = ed25519_jwk_pair();

        let token = sign_token_at(
            &private,
            SignOptions::new("k1", JwtClaims::default()).ttl_secs(30),
            now(),
        )?;

        // Tamper with the signature; the expired token still reports
        // expiry, not an invalid signature.
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[2] = "AQIDBAU";
        let tampered = parts.join(".");

        let later = UNIX_EPOCH + Duration::from_secs(NOW_SECS + 31);
        assert!(matches!(
            verify_token_at(&public, &tampered, later),
            Err(JwtError::Expired { .. })
        ));

        Ok(())
    }
}
