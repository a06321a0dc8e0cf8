//! Error types of the sigil jwt crate.

use sigil_key::{JwsAlgorithm, KeyError};
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for token operations.
pub type JwtResult<T> = Result<T, JwtError>;

/// Defines the types of errors that can occur in token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// A token must consist of exactly three non-empty dot-separated parts.
    #[error("token must consist of 3 non-empty parts, got {parts}")]
    TokenFormat {
        /// Number of parts found.
        parts: usize,
    },

    /// A token segment failed base64url or JSON decoding.
    #[error("failed to decode segment {text:?}: {source}")]
    SegmentDecode {
        /// The offending encoded text.
        text: String,
        /// The underlying decode failure.
        source: Box<JwtError>,
    },

    /// The header `typ` field named something other than a JWT.
    #[error("unsupported token type {0:?}")]
    UnsupportedTokenType(String),

    /// The token is not valid yet.
    #[error("token not valid before {nbf} (now {now})")]
    NotYetValid {
        /// The `nbf` claim, in Unix seconds.
        nbf: u64,
        /// Current time, in Unix seconds.
        now: u64,
    },

    /// The token has expired. Equality with the current time already counts
    /// as expired.
    #[error("token expired at {exp} (now {now})")]
    Expired {
        /// The `exp` claim, in Unix seconds.
        exp: u64,
        /// Current time, in Unix seconds.
        now: u64,
    },

    /// Tokens declaring the `none` algorithm are rejected unconditionally.
    #[error("tokens with the `none` algorithm are not acceptable")]
    NoneAlgorithm,

    /// The header's declared algorithm does not match the verification key.
    #[error("header declares {header} but the key resolves to {key}")]
    AlgorithmMismatch {
        /// Algorithm declared in the token header.
        header: JwsAlgorithm,
        /// Algorithm the key material resolves to.
        key: JwsAlgorithm,
    },

    /// The signature did not verify against the signed bytes.
    #[error("token signature did not verify")]
    SignatureInvalid,

    /// Signing requires a non-empty key identifier.
    #[error("a non-empty `kid` is required")]
    MissingKid,

    /// Base64 decoding errors.
    #[error("base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Json (de)serialization errors.
    #[error("json serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Key errors.
    #[error("key error: {0}")]
    KeyError(#[from] KeyError),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `JwtResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> JwtResult<T> {
    Result::Ok(value)
}
