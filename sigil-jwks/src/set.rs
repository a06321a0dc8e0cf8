use serde::{Deserialize, Serialize};
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A published key-set document: an array of candidate keys, each usually
/// tagged with a `kid`.
///
/// Entries are kept as raw JSON so unsupported keys can coexist with usable
/// ones; only the entry actually selected for verification is parsed into a
/// [`sigil_key::Jwk`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    /// The candidate keys.
    pub keys: Vec<Value>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl JwkSet {
    /// Finds the first candidate whose `kid` equals the given identifier.
    /// Entries without a string `kid` are skipped.
    pub fn find(&self, kid: &str) -> Option<&Value> {
        self.keys
            .iter()
            .find(|key| key.get("kid").and_then(Value::as_str) == Some(kid))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
