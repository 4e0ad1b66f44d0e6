use crate::chain::key::SigningKey;
use crate::chain::mac::{compute_mac, HashAlgorithm, MAC_SIZE};
use crate::codec::Codec;
use crate::error::{PawpadError, Result};
use crate::payload::Frame;

/// Signature size in bytes (one MAC tag)
pub const SIGNATURE_SIZE: usize = MAC_SIZE;

/// Run frame carrying one chain link
pub const SIGNATURE_FRAME: Frame = Frame::Fixed(SIGNATURE_SIZE);

/// One link of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, or `None` if it is not exactly one signature wide
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; SIGNATURE_SIZE] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Chain seed: the MAC of the empty message
pub fn seed(key: &SigningKey, algorithm: HashAlgorithm) -> Signature {
    Signature(compute_mac(&[], key, algorithm))
}

/// Compute the link for `carrier` at `position` following `prev`.
///
/// Message layout: `utf8(carrier) || position as u64 BE || prev`.
pub fn link(
    prev: &Signature,
    carrier: char,
    position: usize,
    key: &SigningKey,
    algorithm: HashAlgorithm,
) -> Signature {
    let mut utf8 = [0u8; 4];
    let carrier = carrier.encode_utf8(&mut utf8).as_bytes();
    let position = (position as u64).to_be_bytes();

    let parts: [&[u8]; 3] = [carrier, &position, prev.as_bytes()];
    Signature(compute_mac(&parts, key, algorithm))
}

/// Compute the full chain for a carrier sequence
pub fn compute_chain<I>(carriers: I, key: &SigningKey, algorithm: HashAlgorithm) -> Vec<Signature>
where
    I: IntoIterator<Item = char>,
{
    let mut prev = seed(key, algorithm);
    carriers
        .into_iter()
        .enumerate()
        .map(|(position, carrier)| {
            prev = link(&prev, carrier, position, key, algorithm);
            prev
        })
        .collect()
}

/// Sign `text`, embedding each character's link right after it.
///
/// Runs already present in `text` are discarded before signing, so signing
/// a signed document re-signs its visible text. Output is deterministic for a
/// given text, key and algorithm.
pub fn sign(text: &str, key: &SigningKey, algorithm: HashAlgorithm, codec: &Codec) -> Result<String> {
    let carriers: Vec<char> = text.chars().filter(|&c| !codec.is_selector(c)).collect();
    if carriers.is_empty() {
        return Err(PawpadError::EmptyCarrier);
    }

    let chain = compute_chain(carriers.iter().copied(), key, algorithm);
    let run_chars = SIGNATURE_SIZE * 4;
    let mut out = String::with_capacity(carriers.len() * (run_chars + 4));

    for (carrier, signature) in carriers.iter().zip(chain.iter()) {
        out.push(*carrier);
        out.push_str(&codec.encode_bytes(&SIGNATURE_FRAME.frame(signature.as_bytes())?));
    }

    Ok(out)
}
