use std::{fmt::Display, ops::Deref, str::FromStr};

use crate::{decode_bytes, encode_bytes, JwtError};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The digital signature segment of a token.
///
/// Holds the raw signature bytes; the wire representation is URL-safe,
/// unpadded base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtSignature(Vec<u8>);

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwtSignature {
    /// Returns the raw bytes of the signature.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Converts the signature into a vector of bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Display for JwtSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encode_bytes(&self.0))
    }
}

impl FromStr for JwtSignature {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JwtSignature(decode_bytes(s)?))
    }
}

impl From<Vec<u8>> for JwtSignature {
    fn from(signature: Vec<u8>) -> Self {
        Self(signature)
    }
}

impl From<JwtSignature> for Vec<u8> {
    fn from(signature: JwtSignature) -> Self {
        signature.0
    }
}

impl Deref for JwtSignature {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_signature_display() {
        let signature = JwtSignature::from(vec![1, 2, 3, 4, 5]);

        let displayed = signature.to_string();
        tracing::debug!(?displayed);
        assert_eq!(displayed, "AQIDBAU");

        let parsed: JwtSignature = displayed.parse().unwrap();
        assert_eq!(parsed, signature);
    }
}
