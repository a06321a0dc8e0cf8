#![warn(missing_docs)]

//! Token codec and sign/verify engine for the sigil token suite.
//!
//! Tokens are the standard three-part `header.payload.signature` text, with
//! header and payload as base64url-encoded JSON and the signature covering
//! the encoded `header.payload` bytes. Key material is supplied by the
//! caller per call; nothing is cached or persisted.

mod claims;
mod codec;
mod error;
mod header;
mod material;
mod sign;
mod signature;
mod token;
mod verify;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use claims::*;
pub use codec::*;
pub use error::*;
pub use header::*;
pub use material::*;
pub use sign::*;
pub use signature::*;
pub use token::*;
pub use verify::*;

pub use sigil_key::{EcJwk, Jwk, JwsAlgorithm, OkpJwk, RsaJwk};
