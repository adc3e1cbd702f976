//! # Digest Derivation
//!
//! Turns an input string into a deterministic sequence of *entropy units*.
//! One unit feeds each grid row, and the first three feed the default
//! foreground colour.
//!
//! ## Entropy Units
//!
//! Two encodings are supported:
//!
//! | Encoding | Units | MD5 length | Notes |
//! |----------|-------|------------|-------|
//! | `Raw` | digest bytes | 16 | full 8 bits of variability per unit |
//! | `HexAscii` | ASCII codes of the hex digest | 32 | only `0-9a-f`, legacy |
//!
//! `HexAscii` reproduces generators that indexed the hex *string* instead of
//! the digest bytes. Its units are always one of 16 ASCII codes, so row bits
//! 4 and 7 never vary and default colours stay in the 48..=102 band. Use it
//! only when existing avatars must be reproduced bit for bit; `Raw` is the
//! default.
//!
//! Unit lookup wraps around, so grids taller than the digest reuse rows
//! from the top.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// Hash function used to derive the digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// MD5 (16 bytes). Matches historically generated avatars.
    #[default]
    Md5,
    /// SHA-256 (32 bytes).
    Sha256,
}

impl HashAlgorithm {
    /// Parse an algorithm name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "md5" => Some(HashAlgorithm::Md5),
            "sha256" | "sha-256" => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }
}

/// How digest bytes are exposed as entropy units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestEncoding {
    /// Raw digest bytes.
    #[default]
    Raw,
    /// ASCII codes of the lowercase hex digest.
    HexAscii,
}

/// Deterministic entropy derived from an input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    units: Vec<u8>,
}

impl Digest {
    /// Derive the digest for `input`. Total: every string, including the
    /// empty one, yields a digest.
    pub fn derive(input: &str, algorithm: HashAlgorithm, encoding: DigestEncoding) -> Self {
        let bytes = match algorithm {
            HashAlgorithm::Md5 => Md5::digest(input.as_bytes()).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(input.as_bytes()).to_vec(),
        };

        let units = match encoding {
            DigestEncoding::Raw => bytes,
            DigestEncoding::HexAscii => hex::encode(&bytes).into_bytes(),
        };

        Self { units }
    }

    /// Entropy unit at `index`, wrapping past the end.
    #[inline]
    pub fn unit(&self, index: usize) -> u8 {
        self.units[index % self.units.len()]
    }

    /// Number of distinct entropy units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The first three units, used as the default foreground RGB.
    pub fn rgb(&self) -> [u8; 3] {
        [self.unit(0), self.unit(1), self.unit(2)]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.units
    }

    /// Hex rendering of the units (handy for logs and debugging).
    pub fn to_hex(&self) -> String {
        hex::encode(&self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_vector() {
        let digest = Digest::derive("", HashAlgorithm::Md5, DigestEncoding::Raw);
        assert_eq!(digest.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(digest.len(), 16);
    }

    #[test]
    fn test_sha256_length() {
        let digest = Digest::derive("abc", HashAlgorithm::Sha256, DigestEncoding::Raw);
        assert_eq!(digest.len(), 32);
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hex_ascii_units() {
        let digest = Digest::derive("", HashAlgorithm::Md5, DigestEncoding::HexAscii);
        assert_eq!(digest.len(), 32);
        // "d41d..." -> ASCII codes
        assert_eq!(digest.unit(0), b'd');
        assert_eq!(digest.unit(1), b'4');
        assert_eq!(digest.unit(2), b'1');
        assert!(digest
            .as_bytes()
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b)));
    }

    #[test]
    fn test_deterministic() {
        let a = Digest::derive("someone@example.com", HashAlgorithm::Md5, DigestEncoding::Raw);
        let b = Digest::derive("someone@example.com", HashAlgorithm::Md5, DigestEncoding::Raw);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_wraps() {
        let digest = Digest::derive("wrap", HashAlgorithm::Md5, DigestEncoding::Raw);
        assert_eq!(digest.unit(16), digest.unit(0));
        assert_eq!(digest.unit(35), digest.unit(3));
    }

    #[test]
    fn test_algorithm_from_name() {
        assert_eq!(HashAlgorithm::from_name("MD5"), Some(HashAlgorithm::Md5));
        assert_eq!(HashAlgorithm::from_name("sha-256"), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::from_name("crc32"), None);
    }
}
