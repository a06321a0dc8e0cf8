#![warn(missing_docs)]

//! Remote key-set verification for the sigil token suite: fetches a
//! published key-set document, selects the key matching a token's `kid`,
//! and delegates to the standard verification path.
//!
//! Nothing is cached; every verification re-fetches the key set, trading a
//! network round trip for freshness on key rotation.

mod error;
mod fetch;
mod set;
mod verify;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use error::*;
pub use fetch::*;
pub use set::*;
pub use verify::*;
