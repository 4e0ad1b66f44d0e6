use crate::chain::key::SigningKey;
use crate::error::{PawpadError, Result};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::Sha3_256;

type HmacSha3_256 = Hmac<Sha3_256>;
type HmacSha256 = Hmac<Sha256>;

/// Tag size in bytes, identical for every algorithm
pub const MAC_SIZE: usize = 32;

/// Keyed MAC used for chain links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha3,
    Blake3,
}

impl std::str::FromStr for HashAlgorithm {
    type Err = PawpadError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha256" | "hmac-sha256" => Ok(Self::Sha256),
            "sha3" | "hmac-sha3" => Ok(Self::Sha3),
            "blake3" => Ok(Self::Blake3),
            _ => Err(PawpadError::UnsupportedAlgorithm(format!("hash: {}", s))),
        }
    }
}

/// Compute the MAC of the concatenation of `parts`
pub fn compute_mac(parts: &[&[u8]], key: &SigningKey, algorithm: HashAlgorithm) -> [u8; MAC_SIZE] {
    let secret = key.as_bytes();

    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
            for part in parts {
                mac.update(part);
            }
            to_tag(&mac.finalize().into_bytes())
        }
        HashAlgorithm::Sha3 => {
            let mut mac =
                HmacSha3_256::new_from_slice(secret).expect("HMAC can take key of any size");
            for part in parts {
                mac.update(part);
            }
            to_tag(&mac.finalize().into_bytes())
        }
        HashAlgorithm::Blake3 => {
            let mut hasher = blake3::Hasher::new_keyed(&derive_blake3_key(secret));
            for part in parts {
                hasher.update(part);
            }
            *hasher.finalize().as_bytes()
        }
    }
}

fn to_tag(bytes: &[u8]) -> [u8; MAC_SIZE] {
    let mut tag = [0u8; MAC_SIZE];
    tag.copy_from_slice(bytes);
    tag
}

/// Derive a 32-byte key for BLAKE3 from arbitrary secret
fn derive_blake3_key(secret: &[u8]) -> [u8; 32] {
    *blake3::hash(secret).as_bytes()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SigningKey {
        SigningKey::new(b"secret key".to_vec()).unwrap()
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        // RFC 4231 test case 2
        let key = SigningKey::new(b"Jefe".to_vec()).unwrap();
        let parts: &[&[u8]] = &[b"what do ya want ", b"for nothing?"];
        let mac = compute_mac(parts, &key, HashAlgorithm::Sha256);
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_algorithms_differ() {
        let data: &[&[u8]] = &[b"abc"];
        let a = compute_mac(data, &key(), HashAlgorithm::Sha256);
        let b = compute_mac(data, &key(), HashAlgorithm::Sha3);
        let c = compute_mac(data, &key(), HashAlgorithm::Blake3);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parts_are_concatenated() {
        for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Sha3, HashAlgorithm::Blake3] {
            let split: &[&[u8]] = &[b"ab", b"cd"];
            let joined: &[&[u8]] = &[b"abcd"];
            assert_eq!(
                compute_mac(split, &key(), algorithm),
                compute_mac(joined, &key(), algorithm)
            );
        }
    }

    #[test]
    fn test_key_changes_mac() {
        let other = SigningKey::new(b"other key".to_vec()).unwrap();
        let data: &[&[u8]] = &[b"abc"];
        assert_ne!(
            compute_mac(data, &key(), HashAlgorithm::Sha256),
            compute_mac(data, &other, HashAlgorithm::Sha256)
        );
    }

    #[test]
    fn test_hash_algorithm_from_str() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3);
        assert_eq!("blake3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Blake3);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2]));
    }
}
