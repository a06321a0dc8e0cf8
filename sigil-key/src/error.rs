//! Error types of the sigil key crate.

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;

/// Defines the types of errors that can occur in key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Key type not in the supported set.
    #[error("unsupported key type {0:?}")]
    UnsupportedKeyType(String),

    /// Curve not in the supported set for its key family.
    #[error("unsupported curve {0:?}")]
    UnsupportedCurve(String),

    /// Algorithm identifier not usable with the given key material.
    #[error("unsupported algorithm {0:?}")]
    UnsupportedAlgorithm(String),

    /// The `none` sentinel never resolves to usable parameters.
    #[error("the `none` algorithm is not acceptable")]
    NoneAlgorithm,

    /// A required component is missing from the key description.
    #[error("key description is missing the {0:?} component")]
    MissingComponent(&'static str),

    /// A key component decoded to more bytes than its field can hold.
    #[error("key component {component:?} has invalid length {len}")]
    InvalidComponentLength {
        /// Name of the offending component.
        component: &'static str,
        /// Decoded length in bytes.
        len: usize,
    },

    /// Base64 decoding errors.
    #[error("base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Json (de)serialization errors.
    #[error("json serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Signature creation or verification errors from the underlying
    /// primitives.
    #[error("signature error: {0}")]
    SignatureError(#[from] signature::Error),

    /// RSA key construction errors.
    #[error("rsa key error: {0}")]
    RsaError(#[from] rsa::Error),
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `KeyResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> KeyResult<T> {
    Result::Ok(value)
}
