use crate::chain::SigningKey;
use crate::error::{PawpadError, Result};
use std::io::Read;
use std::path::Path;

/// Resolve the text to operate on: `--text`, then `--input`, then stdin.
///
/// A bare line ending at the very end of stdin is dropped, so output piped
/// from another command reads back unchanged.
pub fn read_text(text: Option<String>, input: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = input {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    if buf.is_empty() {
        return Err(PawpadError::MissingInput(
            "provide --text, --input or pipe text on stdin".into(),
        ));
    }
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

/// Resolve the signing key: `--key` as literal bytes or `--key-file` read raw
pub fn load_key(key: Option<&str>, key_file: Option<&Path>) -> Result<SigningKey> {
    match (key, key_file) {
        (Some(key), _) => SigningKey::new(key.as_bytes().to_vec()),
        (None, Some(path)) => SigningKey::new(std::fs::read(path)?),
        (None, None) => Err(PawpadError::Key(
            "no key provided (use --key or --key-file)".into(),
        )),
    }
}

/// Write `text` to `output` and describe it, or hand `text` back for stdout
pub fn emit(text: &str, output: Option<&Path>) -> Result<String> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(format!(
                "Wrote {} characters to {}\n",
                text.chars().count(),
                path.display()
            ))
        }
        None => Ok(format!("{}\n", text)),
    }
}
