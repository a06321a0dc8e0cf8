use sigil_key::{Jwk, KeyResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Caller-supplied key material: either a structured key description or
/// base64url-encoded JWK JSON text.
///
/// The engine never mutates or persists the material; each sign or verify
/// call resolves and imports it from scratch.
#[derive(Debug, Clone)]
pub enum KeyMaterial {
    /// An already-structured key description.
    Jwk(Jwk),

    /// Base64url-encoded JWK JSON text.
    Encoded(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl KeyMaterial {
    /// Normalizes the material into a structured key description.
    pub fn resolve(self) -> KeyResult<Jwk> {
        match self {
            KeyMaterial::Jwk(jwk) => Ok(jwk),
            KeyMaterial::Encoded(text) => Jwk::from_base64url(&text),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<Jwk> for KeyMaterial {
    fn from(jwk: Jwk) -> Self {
        KeyMaterial::Jwk(jwk)
    }
}

impl From<&Jwk> for KeyMaterial {
    fn from(jwk: &Jwk) -> Self {
        KeyMaterial::Jwk(jwk.clone())
    }
}

impl From<String> for KeyMaterial {
    fn from(text: String) -> Self {
        KeyMaterial::Encoded(text)
    }
}

impl From<&str> for KeyMaterial {
    fn from(text: &str) -> Self {
        KeyMaterial::Encoded(text.to_string())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
