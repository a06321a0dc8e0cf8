use base64::prelude::{Engine, BASE64_URL_SAFE_NO_PAD};
use serde::{de::DeserializeOwned, Serialize};

use crate::{JwtError, JwtResult};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Encodes raw bytes as URL-safe, unpadded base64 text.
pub fn encode_bytes(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes URL-safe, unpadded base64 text into raw bytes.
pub fn decode_bytes(text: &str) -> JwtResult<Vec<u8>> {
    Ok(BASE64_URL_SAFE_NO_PAD.decode(text.as_bytes())?)
}

/// JSON-serializes a value and base64url-encodes the result.
pub fn object_to_base64url<T>(value: &T) -> JwtResult<String>
where
    T: Serialize,
{
    let json = serde_json::to_vec(value)?;
    Ok(encode_bytes(&json))
}

/// Base64url-decodes text and JSON-parses it into a typed value.
///
/// Failures carry the offending text so callers can log what was rejected.
pub fn base64url_to_object<T>(text: &str) -> JwtResult<T>
where
    T: DeserializeOwned,
{
    let decoded = decode_bytes(text).map_err(|source| JwtError::SegmentDecode {
        text: text.to_string(),
        source: Box::new(source),
    })?;

    serde_json::from_slice(&decoded).map_err(|source| JwtError::SegmentDecode {
        text: text.to_string(),
        source: Box::new(JwtError::JsonError(source)),
    })
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
