//! Original-text recovery.

use crate::codec::Codec;

/// Strip every payload run, keeping only the carrier characters.
///
/// Works on the output of any encoder and is idempotent.
pub fn extract_text(text: &str, codec: &Codec) -> String {
    text.chars().filter(|&c| !codec.is_selector(c)).collect()
}
