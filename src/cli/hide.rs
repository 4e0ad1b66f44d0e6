use crate::cli::input::emit;
use crate::codec::Codec;
use crate::error::{PawpadError, Result};
use crate::message;
use crate::payload::Placement;
use std::path::PathBuf;
use tracing::debug;

/// Options for the hide command
#[derive(Debug, Clone, Default)]
pub struct HideOptions {
    pub message: String,
    /// Hide the whole message in a one-character host
    pub single_char: bool,
    pub output: Option<PathBuf>,
}

/// Hide a message in `text`
pub fn hide_message(text: &str, options: &HideOptions, codec: &Codec) -> Result<String> {
    let placement = if options.single_char {
        let count = text.chars().filter(|&c| !codec.is_selector(c)).count();
        if count != 1 {
            return Err(PawpadError::SingleCharacterHost(count));
        }
        Placement::SingleCharacter
    } else {
        Placement::EveryCharacter
    };
    debug!(?placement, bytes = options.message.len(), "hiding message");

    let hidden = message::hide(text, options.message.as_bytes(), placement, codec)?;
    emit(&hidden, options.output.as_deref())
}

/// Reveal a hidden message
pub fn reveal_message(text: &str, codec: &Codec) -> Result<String> {
    match message::reveal_utf8(text, codec)? {
        Some(msg) => Ok(format!("{}\n", msg)),
        None => Ok("No hidden message found\n".to_string()),
    }
}
