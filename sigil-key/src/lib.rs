#![warn(missing_docs)]
#![allow(clippy::module_inception)]

//! Key material layer for the sigil token suite: the JWK model, the closed
//! algorithm binding tables, and per-family signing and verification keys.

mod ed25519;
mod error;
mod jwk;
mod jws;
mod kind;
mod p256;
mod p384;
mod p521;
mod rsa;
mod traits;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use ed25519::*;
pub use error::*;
pub use jwk::*;
pub use jws::*;
pub use kind::*;
pub use p256::*;
pub use p384::*;
pub use p521::*;
pub use rsa::*;
pub use traits::*;
