use std::time::{SystemTime, UNIX_EPOCH};

use sigil_key::{Sign, WrappedSigningKey};

use crate::{
    encode_bytes, encode_token_data, JwtClaims, JwtError, JwtHeader, JwtResult, KeyMaterial,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Default time-to-live for signed tokens, in seconds.
pub const DEFAULT_TTL_SECS: u64 = 3600;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Options for signing a token.
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Key identifier stamped into the token header. Required, non-empty.
    pub kid: String,

    /// Claims merged into the payload.
    pub claims: JwtClaims,

    /// Time-to-live added to the issued-at time to compute expiry.
    pub ttl_secs: u64,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl SignOptions {
    /// Creates options with the default time-to-live.
    pub fn new(kid: impl Into<String>, claims: JwtClaims) -> Self {
        Self {
            kid: kid.into(),
            claims,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    /// Overrides the time-to-live.
    pub fn ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Signs a token with the current system time. See [`sign_token_at`].
pub fn sign_token(key: impl Into<KeyMaterial>, options: SignOptions) -> JwtResult<String> {
    sign_token_at(key, options, SystemTime::now())
}

/// Signs a token at the given time.
///
/// The header algorithm is the canonical one for the key family; the payload
/// is the caller's claims with `iat` stamped (a caller-supplied `iat` wins)
/// and `exp = iat + ttl_secs`.
pub fn sign_token_at(
    key: impl Into<KeyMaterial>,
    options: SignOptions,
    now: SystemTime,
) -> JwtResult<String> {
    if options.kid.is_empty() {
        return Err(JwtError::MissingKid);
    }

    let jwk = key.into().resolve()?;
    let alg = jwk.canonical_alg()?;
    let signing_key = WrappedSigningKey::from_jwk(&jwk)?;

    let header = JwtHeader::new(alg, options.kid);

    let mut claims = options.claims;
    let iat = claims.iat.unwrap_or_else(|| unix_secs(now));
    claims.iat = Some(iat);
    claims.exp = Some(iat + options.ttl_secs);

    sign_with_key(&header, &claims, &signing_key)
}

/// Signs an already-assembled header/claims pair with an imported key.
///
/// The signature covers the UTF-8 bytes of the encoded `header.payload`
/// text, not the decoded objects.
pub fn sign_with_key(
    header: &JwtHeader,
    claims: &JwtClaims,
    key: &WrappedSigningKey,
) -> JwtResult<String> {
    let data = encode_token_data(header, claims)?;
    let signature = key.sign(data.as_bytes())?;

    Ok(format!("{}.{}", data, encode_bytes(&signature)))
}

/// Converts a time to whole Unix seconds.
pub(crate) fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}
