//! Error types of the sigil jwks crate.

use sigil_jwt::JwtError;
use sigil_key::KeyError;
use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for key-set operations.
pub type JwksResult<T> = Result<T, JwksError>;

/// Defines the types of errors that can occur resolving keys from a
/// published key set.
#[derive(Debug, Error)]
pub enum JwksError {
    /// The key-set document could not be retrieved as JSON.
    #[error("failed to fetch key set: status {status}, content type {content_type:?}")]
    FetchFailed {
        /// HTTP status code of the response.
        status: u16,
        /// Content type of the response, if any.
        content_type: Option<String>,
    },

    /// No key in the set matched the token's key identifier.
    #[error("no usable key found for {kid:?} ({keys_scanned} keys scanned)")]
    KeyNotFound {
        /// The key identifier the token asked for.
        kid: String,
        /// Number of candidate keys scanned.
        keys_scanned: usize,
    },

    /// The token header carries no key identifier to look up.
    #[error("token header carries no `kid`")]
    MissingKid,

    /// Http transport errors.
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Json (de)serialization errors.
    #[error("json serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Token errors.
    #[error("token error: {0}")]
    JwtError(#[from] JwtError),

    /// Key errors.
    #[error("key error: {0}")]
    KeyError(#[from] KeyError),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `JwksResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> JwksResult<T> {
    Result::Ok(value)
}
