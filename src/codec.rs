//! Byte <-> invisible codepoint translation.
//!
//! Every byte maps to exactly one selector codepoint: bytes `0..16` land in a
//! 16-wide "low" range and bytes `16..256` in a 240-wide "supplementary"
//! range. The two ranges are disjoint from ordinary text, so a run of
//! selectors needs no escaping and no terminator of its own.

use crate::error::{PawpadError, Result};
use serde::{Deserialize, Serialize};

/// Width of the low selector range (bytes `0..16`)
pub const LOW_RANGE_LEN: u32 = 16;

/// Width of the supplementary selector range (bytes `16..256`)
pub const HIGH_RANGE_LEN: u32 = 240;

/// Codepoint range table used to carry bytes.
///
/// Passed explicitly to every operation that reads or writes payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    low_base: u32,
    high_base: u32,
}

impl Codec {
    /// Unicode variation selectors: VS1..=VS16 (U+FE00..U+FE0F) and
    /// VS17..=VS256 (U+E0100..U+E01EF)
    pub const VARIATION_SELECTORS: Codec = Codec {
        low_base: 0xFE00,
        high_base: 0xE0100,
    };

    /// Build a codec from custom range bases.
    ///
    /// Both ranges must consist of valid scalar values and must not overlap.
    pub fn new(low_base: char, high_base: char) -> Result<Self> {
        let low_base = low_base as u32;
        let high_base = high_base as u32;
        let low_end = low_base + LOW_RANGE_LEN - 1;
        let high_end = high_base + HIGH_RANGE_LEN - 1;

        if !is_scalar_range(low_base, low_end) || !is_scalar_range(high_base, high_end) {
            return Err(PawpadError::InvalidCodec(format!(
                "selector ranges U+{:04X} / U+{:04X} contain non-scalar values",
                low_base, high_base
            )));
        }
        if !(low_end < high_base || high_end < low_base) {
            return Err(PawpadError::InvalidCodec(format!(
                "selector ranges U+{:04X} and U+{:04X} overlap",
                low_base, high_base
            )));
        }

        Ok(Self {
            low_base,
            high_base,
        })
    }

    /// Map one byte to its selector
    pub fn encode_byte(&self, byte: u8) -> char {
        let cp = if u32::from(byte) < LOW_RANGE_LEN {
            self.low_base + u32::from(byte)
        } else {
            self.high_base + u32::from(byte) - LOW_RANGE_LEN
        };
        char::from_u32(cp).expect("selector ranges are validated at construction")
    }

    /// Map a selector back to its byte, or `None` for any other character
    pub fn decode_char(&self, c: char) -> Option<u8> {
        let cp = c as u32;
        if (self.low_base..self.low_base + LOW_RANGE_LEN).contains(&cp) {
            Some((cp - self.low_base) as u8)
        } else if (self.high_base..self.high_base + HIGH_RANGE_LEN).contains(&cp) {
            Some((cp - self.high_base + LOW_RANGE_LEN) as u8)
        } else {
            None
        }
    }

    pub fn is_selector(&self, c: char) -> bool {
        self.decode_char(c).is_some()
    }

    /// Encode bytes as a string of selectors
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.encode_byte(b)).collect()
    }

    /// Decode a string made only of selectors.
    ///
    /// Any other character is a [`PawpadError::Decode`].
    pub fn decode_codepoints(&self, seq: &str) -> Result<Vec<u8>> {
        seq.chars()
            .enumerate()
            .map(|(i, c)| {
                self.decode_char(c).ok_or_else(|| {
                    PawpadError::Decode(format!(
                        "U+{:04X} at offset {} is not a payload selector",
                        c as u32, i
                    ))
                })
            })
            .collect()
    }

    /// Split text into carrier characters and the payload run following each.
    ///
    /// A carrier with nothing after it yields an empty payload. Selectors that
    /// appear before the first visible character form a leading segment with
    /// no carrier.
    pub fn scan(&self, text: &str) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();

        for c in text.chars() {
            match self.decode_char(c) {
                Some(byte) => match segments.last_mut() {
                    Some(segment) => segment.payload.push(byte),
                    None => segments.push(Segment {
                        carrier: None,
                        payload: vec![byte],
                    }),
                },
                None => segments.push(Segment {
                    carrier: Some(c),
                    payload: Vec::new(),
                }),
            }
        }

        segments
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::VARIATION_SELECTORS
    }
}

fn is_scalar_range(start: u32, end: u32) -> bool {
    char::from_u32(end).is_some() && (end < 0xD800 || start > 0xDFFF)
}

/// One carrier character and the decoded run that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub carrier: Option<char>,
    pub payload: Vec<u8>,
}

impl Segment {
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}
