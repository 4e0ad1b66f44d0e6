//! Pawpad - Hide data in text using invisible Unicode variation selectors
//!
//! Every byte maps to one variation selector (VS1..=VS256). Selectors render
//! as nothing and survive copy/paste, so bytes attached after a visible
//! character travel with the text.
//!
//! ## Modes
//!
//! - **Fingerprint**: one tag repeated after every character (watermarking)
//! - **Message**: a length-prefixed secret after every character, or after a
//!   single glyph
//! - **Chain**: a keyed MAC after every character, each link covering the
//!   character, its position and the previous link
//!
//! ```text
//! sig[i] = MAC(K, char[i] || i || sig[i-1])      sig[-1] = MAC(K, "")
//! ```
//!
//! Editing character `j` of a signed document invalidates links `j..`, and
//! verification reports exactly those positions.
//!
//! ## Example
//!
//! ```
//! use pawpad::chain::{sign, verify, HashAlgorithm, SigningKey};
//! use pawpad::codec::Codec;
//! use pawpad::extract::extract_text;
//!
//! let codec = Codec::default();
//! let key = SigningKey::new(b"shared secret".to_vec()).unwrap();
//!
//! let signed = sign("Hi", &key, HashAlgorithm::Sha256, &codec).unwrap();
//! let report = verify(&signed, &key, HashAlgorithm::Sha256, &codec).unwrap();
//! assert!(report.is_valid);
//! assert_eq!(extract_text(&signed, &codec), "Hi");
//! ```

pub mod analyze;
pub mod chain;
pub mod cli;
pub mod codec;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod message;
pub mod payload;

pub use codec::Codec;
pub use error::{PawpadError, Result};
pub use payload::{Frame, Placement};
