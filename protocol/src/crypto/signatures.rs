//! # RSA Signatures
//!
//! The network verifies RSA PKCS#1 v1.5 signatures whose DigestInfo is
//! SHA-384 of the message. The message is the 48-byte deep hash, so what
//! actually gets padded and exponentiated is `SHA-384(deep_hash)`.
//!
//! PKCS#1 v1.5 is deterministic: signing the same message with the same key
//! twice yields identical bytes, which is what makes transaction ids stable.

use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha2::Sha384;
use thiserror::Error;

use super::base64url;
use super::hash::sha384;
use super::keys::KeyMaterial;
use crate::config::OWNER_PUBLIC_EXPONENT;

/// Errors from signing or verifying.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The RSA primitive refused the operation (typically a modulus too
    /// small to hold the SHA-384 DigestInfo plus padding).
    #[error("RSA signing failed: {0}")]
    SigningFailed(String),

    /// The owner field does not describe a usable RSA public key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The signature does not match the message under this key.
    #[error("signature verification failed")]
    VerificationFailed,
}

fn scheme() -> Pkcs1v15Sign {
    Pkcs1v15Sign::new::<Sha384>()
}

/// Sign `message` with PKCS#1 v1.5 over its SHA-384 digest.
///
/// Returns the raw signature, exactly one modulus length long.
pub fn sign(key: &KeyMaterial, message: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let digest = sha384(message);
    key.private_key()
        .sign(scheme(), &digest)
        .map_err(|err| SignatureError::SigningFailed(err.to_string()))
}

/// Verify a PKCS#1 v1.5 / SHA-384 signature over `message`.
///
/// A wrong key and a wrong message fail the same way.
pub fn verify(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<(), SignatureError> {
    let digest = sha384(message);
    public_key
        .verify(scheme(), &digest, signature)
        .map_err(|_| SignatureError::VerificationFailed)
}

/// Rebuild a public key from a transaction `owner` (base64url modulus).
///
/// The owner carries no exponent; the network fixes it at 65537.
pub fn public_key_from_owner(owner: &str) -> Result<RsaPublicKey, SignatureError> {
    let modulus =
        base64url::decode(owner).map_err(|err| SignatureError::InvalidPublicKey(err.to_string()))?;
    if modulus.is_empty() {
        return Err(SignatureError::InvalidPublicKey("empty modulus".into()));
    }
    RsaPublicKey::new(
        BigUint::from_bytes_be(&modulus),
        BigUint::from(OWNER_PUBLIC_EXPONENT),
    )
    .map_err(|err| SignatureError::InvalidPublicKey(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = include_str!("../../tests/fixtures/test_key.json");
    const SMALL_KEY: &str = include_str!("../../tests/fixtures/small_key.json");

    #[test]
    fn sign_then_verify() {
        let key = KeyMaterial::from_json(TEST_KEY).unwrap();
        let sig = sign(&key, b"deep hash bytes").unwrap();
        assert_eq!(sig.len(), 128);
        verify(&key.public_key(), b"deep hash bytes", &sig).unwrap();
    }

    #[test]
    fn signing_is_deterministic() {
        let key = KeyMaterial::from_json(TEST_KEY).unwrap();
        assert_eq!(sign(&key, b"msg").unwrap(), sign(&key, b"msg").unwrap());
    }

    #[test]
    fn wrong_message_fails_verification() {
        let key = KeyMaterial::from_json(TEST_KEY).unwrap();
        let sig = sign(&key, b"original").unwrap();
        assert!(matches!(
            verify(&key.public_key(), b"tampered", &sig),
            Err(SignatureError::VerificationFailed)
        ));
    }

    #[test]
    fn truncated_signature_fails_verification() {
        let key = KeyMaterial::from_json(TEST_KEY).unwrap();
        let sig = sign(&key, b"msg").unwrap();
        assert!(verify(&key.public_key(), b"msg", &sig[..100]).is_err());
    }

    #[test]
    fn key_too_small_for_sha384_digest_info() {
        // 64-byte modulus < 19-byte DigestInfo + 48-byte digest + 11 bytes padding.
        let key = KeyMaterial::from_json(SMALL_KEY).unwrap();
        assert!(matches!(
            sign(&key, b"msg"),
            Err(SignatureError::SigningFailed(_))
        ));
    }

    #[test]
    fn owner_round_trips_to_public_key() {
        let key = KeyMaterial::from_json(TEST_KEY).unwrap();
        let rebuilt = public_key_from_owner(key.owner()).unwrap();
        assert_eq!(rebuilt, key.public_key());
    }

    #[test]
    fn empty_owner_is_rejected() {
        assert!(matches!(
            public_key_from_owner(""),
            Err(SignatureError::InvalidPublicKey(_))
        ));
    }
}
