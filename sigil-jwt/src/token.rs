use crate::{object_to_base64url, JwtClaims, JwtError, JwtHeader, JwtResult, JwtSignature};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A decoded token, split into its parts.
///
/// Decoding never verifies the signature; that is a separate, explicit step.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    /// The decoded header.
    pub header: JwtHeader,

    /// The decoded claims.
    pub payload: JwtClaims,

    /// The raw signature bytes.
    pub signature: JwtSignature,

    /// The bytes the signature covers: the UTF-8 encoding of
    /// `header.payload` exactly as it appeared on the wire.
    pub signed_data: Vec<u8>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Encodes a header/claims pair into the first two segments of a token,
/// joined by a dot. The header encoder stamps the token-type marker.
pub fn encode_token_data(header: &JwtHeader, claims: &JwtClaims) -> JwtResult<String> {
    let header = object_to_base64url(header)?;
    let claims = object_to_base64url(claims)?;
    Ok(format!("{header}.{claims}"))
}

/// Decodes the three-part textual representation of a token.
pub fn decode_token(token: &str) -> JwtResult<DecodedToken> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
        return Err(JwtError::TokenFormat { parts: parts.len() });
    }

    let header = parts[0].parse()?;
    let payload = parts[1].parse()?;
    let signature = parts[2].parse()?;
    let signed_data = format!("{}.{}", parts[0], parts[1]).into_bytes();

    Ok(DecodedToken {
        header,
        payload,
        signature,
        signed_data,
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
