use crate::error::{PawpadError, Result};
use std::fmt;

/// Opaque secret used to key every chain link.
///
/// Signing and verification share the same key.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wrap raw secret bytes. An empty secret is rejected.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(PawpadError::Key("secret is empty".into()));
        }
        Ok(Self(secret))
    }

    /// Parse a hex-encoded secret
    pub fn from_hex(s: &str) -> Result<Self> {
        let secret = hex::decode(s.trim())
            .map_err(|e| PawpadError::Key(format!("secret is not valid hex: {}", e)))?;
        Self::new(secret)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes>)", self.0.len())
    }
}
