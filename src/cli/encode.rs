use crate::codec::Codec;
use crate::error::Result;
use crate::fingerprint::{self, DEFAULT_FINGERPRINT_LEN};
use crate::cli::input::emit;
use rand::RngCore;
use std::path::PathBuf;
use tracing::debug;

/// Options for the encode command
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Hex fingerprint; a random one is generated when absent
    pub fingerprint: Option<String>,
    pub length: usize,
    pub output: Option<PathBuf>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            fingerprint: None,
            length: DEFAULT_FINGERPRINT_LEN,
            output: None,
        }
    }
}

/// Watermark `text` with a fingerprint
pub fn encode_text<R: RngCore + ?Sized>(
    text: &str,
    options: &EncodeOptions,
    rng: &mut R,
    codec: &Codec,
) -> Result<String> {
    let fp = match &options.fingerprint {
        Some(hex) => fingerprint::from_hex(hex)?,
        None => fingerprint::generate(rng, options.length)?,
    };
    debug!(length = fp.len(), chars = text.chars().count(), "encoding fingerprint");

    let encoded = fingerprint::encode(text, &fp, codec)?;
    let mut out = format!("Fingerprint: {}\n", fingerprint::to_hex(&fp));
    out.push_str(&emit(&encoded, options.output.as_deref())?);
    Ok(out)
}

/// Detect an expected fingerprint, or extract whichever one is present
pub fn decode_text(text: &str, expected: Option<&str>, codec: &Codec) -> Result<String> {
    match expected {
        Some(hex) => {
            let fp = fingerprint::from_hex(hex)?;
            if fingerprint::detect(text, &fp, codec) {
                Ok(format!("Fingerprint {} present\n", fingerprint::to_hex(&fp)))
            } else {
                Ok(format!("Fingerprint {} not present\n", fingerprint::to_hex(&fp)))
            }
        }
        None => match fingerprint::extract(text, codec)? {
            Some(fp) => Ok(format!("Fingerprint: {}\n", fingerprint::to_hex(&fp))),
            None => Ok("No fingerprint found\n".to_string()),
        },
    }
}

/// Generate a random fingerprint and render it as hex
pub fn generate_fingerprint<R: RngCore + ?Sized>(length: usize, rng: &mut R) -> Result<String> {
    let fp = fingerprint::generate(rng, length)?;
    Ok(format!("{}\n", fingerprint::to_hex(&fp)))
}
