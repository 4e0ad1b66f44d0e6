//! Secret message hiding with length-prefixed runs.

use crate::codec::Codec;
use crate::error::Result;
use crate::payload::{attach, uniform_payload, Frame, Placement};

/// Hide `message` in `text`.
///
/// With [`Placement::SingleCharacter`] the message rides on the first
/// character only; pass a one-character host to hide it in a single glyph.
pub fn hide(text: &str, message: &[u8], placement: Placement, codec: &Codec) -> Result<String> {
    attach(text, message, Frame::Prefixed, placement, codec)
}

/// Recover a hidden message, or `None` if `text` carries no run
pub fn reveal(text: &str, codec: &Codec) -> Result<Option<Vec<u8>>> {
    uniform_payload(text, Frame::Prefixed, codec)
}

/// [`reveal`], decoding the message as UTF-8 and replacing invalid sequences
pub fn reveal_utf8(text: &str, codec: &Codec) -> Result<Option<String>> {
    Ok(reveal(text, codec)?.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}
