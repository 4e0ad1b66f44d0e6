use crate::chain::StructuralMismatch;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PawpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid codec: {0}")]
    InvalidCodec(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Inconsistent payload: run at position {conflicting} disagrees with run at position {first}")]
    InconsistentPayload { first: usize, conflicting: usize },

    #[error("Key error: {0}")]
    Key(String),

    #[error("Structural mismatch: {0}")]
    StructuralMismatch(StructuralMismatch),

    #[error("Signature chain broken at position {first_position} ({count} positions invalid)")]
    Tampered { first_position: usize, count: usize },

    #[error("Invalid fingerprint length: {0}. Must be between 1 and 256 bytes")]
    InvalidFingerprintLength(usize),

    #[error("Payload too large: {size} bytes, max {max} bytes per run")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Host text has no characters to carry a payload")]
    EmptyCarrier,

    #[error("Single-character mode requires exactly one host character, got {0}")]
    SingleCharacterHost(usize),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, PawpadError>;
