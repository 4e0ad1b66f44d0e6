//! Fingerprint watermarking: one tag repeated after every character.

use crate::codec::Codec;
use crate::error::{PawpadError, Result};
use crate::payload::{attach, uniform_payload, Frame, Placement, MAX_RUN_BYTES};
use rand::RngCore;

/// Default fingerprint length in bytes
pub const DEFAULT_FINGERPRINT_LEN: usize = 16;

/// Generate a random fingerprint of `length` bytes from the given source
pub fn generate<R: RngCore + ?Sized>(rng: &mut R, length: usize) -> Result<Vec<u8>> {
    check_length(length)?;
    let mut fingerprint = vec![0u8; length];
    rng.fill_bytes(&mut fingerprint);
    Ok(fingerprint)
}

/// Embed `fingerprint` after every character of `text`
pub fn encode(text: &str, fingerprint: &[u8], codec: &Codec) -> Result<String> {
    check_length(fingerprint.len())?;
    attach(text, fingerprint, Frame::Raw, Placement::EveryCharacter, codec)
}

/// True iff every non-empty run decodes to exactly `expected`.
///
/// Only runs that follow a visible character count, so text without any
/// carrier is never a match.
pub fn detect(text: &str, expected: &[u8], codec: &Codec) -> bool {
    let mut found = false;
    let segments = codec.scan(text);
    for segment in segments
        .iter()
        .filter(|s| s.carrier.is_some() && s.has_payload())
    {
        if segment.payload != expected {
            return false;
        }
        found = true;
    }
    found
}

/// Extract the fingerprint carried by `text`.
///
/// Returns `Ok(None)` when the text carries nothing, and
/// [`PawpadError::InconsistentPayload`] when runs disagree.
pub fn extract(text: &str, codec: &Codec) -> Result<Option<Vec<u8>>> {
    uniform_payload(text, Frame::Raw, codec)
}

pub fn to_hex(fingerprint: &[u8]) -> String {
    hex::encode(fingerprint)
}

pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    let fingerprint = hex::decode(s.trim())?;
    check_length(fingerprint.len())?;
    Ok(fingerprint)
}

fn check_length(length: usize) -> Result<()> {
    if length == 0 || length > MAX_RUN_BYTES {
        return Err(PawpadError::InvalidFingerprintLength(length));
    }
    Ok(())
}
