//! Chained per-character signatures.
//!
//! Each character is followed by a 32-byte MAC over the character, its
//! position and the previous link, so an edit anywhere breaks the chain from
//! that point on.

pub mod key;
pub mod mac;
pub mod sign;
pub mod verify;

pub use key::*;
pub use mac::*;
pub use sign::*;
pub use verify::*;
