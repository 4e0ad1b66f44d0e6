//! Per-character inspection of hidden data.

use crate::codec::Codec;
use serde::{Deserialize, Serialize};

/// What one character carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterReport {
    pub position: usize,
    /// `None` for selectors found before the first character
    pub carrier: Option<char>,
    /// Carrier codepoint formatted as `U+XXXX`
    pub codepoint: Option<String>,
    /// Hex of the decoded run, empty when nothing is attached
    pub payload: String,
}

impl CharacterReport {
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// Report every carrier in `text` along with the run it carries
pub fn analyze(text: &str, codec: &Codec) -> Vec<CharacterReport> {
    codec
        .scan(text)
        .into_iter()
        .enumerate()
        .map(|(position, segment)| CharacterReport {
            position,
            carrier: segment.carrier,
            codepoint: segment.carrier.map(|c| format!("U+{:04X}", c as u32)),
            payload: hex::encode(&segment.payload),
        })
        .collect()
}
