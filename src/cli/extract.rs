use crate::cli::input::emit;
use crate::codec::Codec;
use crate::error::Result;
use crate::extract::extract_text;
use std::path::Path;

/// Recover the visible text of an encoded or signed document
pub fn extract_original(text: &str, output: Option<&Path>, codec: &Codec) -> Result<String> {
    emit(&extract_text(text, codec), output)
}
