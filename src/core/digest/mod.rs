//! # Digest Module
//!
//! Content digests of uploaded image bytes.
//!
//! Digests label images in the report so an operator can later tell
//! exactly which files were compared. They are reference labels, not a
//! security control.

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Available digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-1, 40 hex characters (default)
    #[default]
    Sha1,
    /// SHA-256, 64 hex characters
    Sha256,
}

impl DigestAlgorithm {
    /// Number of hex characters in a digest
    pub fn hex_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 40,
            DigestAlgorithm::Sha256 => 64,
        }
    }

    /// Compute the digest of `bytes`
    pub fn digest(&self, bytes: &[u8]) -> ContentDigest {
        let raw = match self {
            DigestAlgorithm::Sha1 => Sha1::digest(bytes).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
        };
        ContentDigest {
            hex: to_hex(&raw),
            algorithm: *self,
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestAlgorithm::Sha1 => write!(f, "SHA-1"),
            DigestAlgorithm::Sha256 => write!(f, "SHA-256"),
        }
    }
}

/// A fixed-length hexadecimal fingerprint of some bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    hex: String,
    algorithm: DigestAlgorithm,
}

impl ContentDigest {
    /// Lowercase hex representation
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

/// SHA-1 digest of `bytes`
pub fn digest(bytes: &[u8]) -> ContentDigest {
    DigestAlgorithm::Sha1.digest(bytes)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha1_matches_known_vector() {
        assert_eq!(
            digest(b"abc").as_hex(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn sha256_matches_known_vector() {
        assert_eq!(
            DigestAlgorithm::Sha256.digest(b"abc").as_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x01, 0x02];
        assert_eq!(digest(&bytes), digest(&bytes));
    }

    #[test]
    fn distinct_inputs_give_distinct_digests() {
        assert_ne!(digest(b"image one"), digest(b"image two"));
        assert_ne!(digest(b""), digest(&[0]));
    }

    #[test]
    fn digest_length_is_fixed() {
        for input in [&b""[..], b"x", &[7u8; 10_000][..]] {
            assert_eq!(digest(input).as_hex().len(), DigestAlgorithm::Sha1.hex_len());
            assert_eq!(
                DigestAlgorithm::Sha256.digest(input).as_hex().len(),
                DigestAlgorithm::Sha256.hex_len()
            );
        }
    }

    #[test]
    fn algorithm_display() {
        assert_eq!(DigestAlgorithm::Sha1.to_string(), "SHA-1");
        assert_eq!(DigestAlgorithm::Sha256.to_string(), "SHA-256");
    }
}
