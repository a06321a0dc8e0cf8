use std::time::SystemTime;

use sigil_jwt::{decode_token, verify_token_at, JwtError, VerifiedToken};
use sigil_key::{Jwk, JwsAlgorithm};

use crate::{FetchKeySet, JwkSet, JwksError, JwksResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const JSON_CONTENT_TYPE: &str = "application/json";

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Verifies a token against a published key set, with the current system
/// time. See [`verify_token_with_key_set_at`].
pub async fn verify_token_with_key_set(
    token: &str,
    key_set_uri: &str,
    fetcher: &impl FetchKeySet,
) -> JwksResult<VerifiedToken> {
    verify_token_with_key_set_at(token, key_set_uri, fetcher, SystemTime::now()).await
}

/// Verifies a token against a published key set at the given time.
///
/// Decodes the token and rejects `none`-algorithm tokens before any network
/// call, fetches the key set, requires a success status and a JSON content
/// type, selects the first key matching the header's `kid`, and delegates to
/// the standard verification path.
pub async fn verify_token_with_key_set_at(
    token: &str,
    key_set_uri: &str,
    fetcher: &impl FetchKeySet,
    now: SystemTime,
) -> JwksResult<VerifiedToken> {
    let decoded = decode_token(token)?;
    let kid = decoded.header.kid().ok_or(JwksError::MissingKid)?.to_owned();

    // No point even trying.
    if decoded.header.alg() == JwsAlgorithm::None {
        return Err(JwtError::NoneAlgorithm.into());
    }

    let response = fetcher.fetch(key_set_uri).await?;
    let json_content = response
        .content_type
        .as_deref()
        .map(|value| value.starts_with(JSON_CONTENT_TYPE))
        .unwrap_or(false);

    if !response.ok || !json_content {
        return Err(JwksError::FetchFailed {
            status: response.status,
            content_type: response.content_type,
        });
    }

    let key_set: JwkSet = serde_json::from_slice(&response.body)?;
    let key = key_set.find(&kid).ok_or_else(|| JwksError::KeyNotFound {
        kid: kid.clone(),
        keys_scanned: key_set.keys.len(),
    })?;

    let jwk = Jwk::from_value(key.clone())?;
    Ok(verify_token_at(jwk, token, now)?)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
