//! # Hashing Utilities
//!
//! The two SHA-2 variants the protocol is built on, and nothing else:
//!
//! - **SHA-384**: every step of the canonical ("deep") hash, and the
//!   message digest inside the RSA signature.
//! - **SHA-256**: the payload data root, the transaction id (hash of the
//!   raw signature) and wallet addresses (hash of the modulus).
//!
//! Which hash goes where is dictated by the network's verifier, not by
//! taste. Swapping either one for something faster would be a hard fork.

use sha2::{Digest, Sha256, Sha384};

use crate::config::{DEEP_HASH_LENGTH, ID_HASH_LENGTH};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use weavetx_protocol::crypto::sha256;
///
/// let hash = sha256(b"hello");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; ID_HASH_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; ID_HASH_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute the SHA-384 hash of the input data.
pub fn sha384(data: &[u8]) -> [u8; DEEP_HASH_LENGTH] {
    sha384_multi(&[data])
}

/// SHA-384 over several slices fed in order, without concatenating them
/// first. `sha384_multi(&[label, bytes])` is the labelled intermediate
/// digest of the deep hash.
pub fn sha384_multi(parts: &[&[u8]]) -> [u8; DEEP_HASH_LENGTH] {
    let mut hasher = Sha384::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; DEEP_HASH_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_sha384_known_vector() {
        let hash = sha384(b"abc");
        let expected = hex::decode(
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7",
        )
        .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn sha384_multi_matches_concatenation() {
        let multi = sha384_multi(&[b"owner", b"\x01\x02\x03"]);
        let single = sha384(b"owner\x01\x02\x03");
        assert_eq!(multi, single);
    }

    #[test]
    fn sha384_multi_of_nothing_is_empty_hash() {
        assert_eq!(sha384_multi(&[]), sha384(b""));
    }

    #[test]
    fn hashes_are_case_sensitive() {
        assert_ne!(sha256(b"weave"), sha256(b"Weave"));
        assert_ne!(sha384(b"weave"), sha384(b"Weave"));
    }
}
