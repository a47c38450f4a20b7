//! Transaction signing with the RSA wallet key.
//!
//! Signing is a separate step from building because the key may not be
//! loaded when the record is assembled, and because the builder should be
//! testable without key material.
//!
//! The signature covers exactly the deep hash of the unsigned fields. The id
//! is then derived from the signature, so it only exists once the record is
//! signed and changes with any field (through the signature).

use thiserror::Error;

use super::builder::Transaction;
use super::deep_hash::deep_hash;
use super::types::ValidationError;
use crate::config::SIGNATURE_SCHEME;
use crate::crypto::base64url;
use crate::crypto::hash::sha256;
use crate::crypto::keys::KeyMaterial;
use crate::crypto::signatures::{self, SignatureError};

/// Reasons signing can fail. On any of them no signed record is produced.
#[derive(Debug, Error)]
pub enum SigningError {
    /// Re-signing would silently replace a signature someone may already
    /// have relied on.
    #[error("transaction {id} is already signed")]
    AlreadySigned { id: String },

    /// The record's owner is not this key's modulus; the node would verify
    /// against the wrong public key.
    #[error("transaction owner does not match the signing key")]
    OwnerMismatch,

    /// A field could not be turned into canonical hash input.
    #[error("cannot compute deep hash: {0}")]
    Hash(#[from] ValidationError),

    /// The RSA operation itself failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Signs an unsigned transaction and returns it with `signature` and `id`
/// populated.
///
/// The signing procedure:
/// 1. Compute the deep hash of the unsigned fields.
/// 2. Sign it with RSA PKCS#1 v1.5 over SHA-384.
/// 3. `signature = base64url(sig)`, `id = base64url(SHA-256(sig))`.
///
/// The record is taken by value and only handed back once both fields are
/// set, so callers can never observe a half-signed transaction. The key is
/// only read.
///
/// # Example
///
/// ```rust,no_run
/// use weavetx_protocol::crypto::keys::KeyMaterial;
/// use weavetx_protocol::transaction::{sign_transaction, TransactionBuilder};
///
/// let key = KeyMaterial::from_file("wallet.json").unwrap();
/// let tx = TransactionBuilder::for_key(&key)
///     .reward("100")
///     .data(b"hello".to_vec())
///     .build()
///     .unwrap();
///
/// let signed = sign_transaction(tx, &key).unwrap();
/// assert!(signed.is_signed());
/// ```
pub fn sign_transaction(mut tx: Transaction, key: &KeyMaterial) -> Result<Transaction, SigningError> {
    if tx.is_signed() {
        return Err(SigningError::AlreadySigned {
            id: tx.id().to_string(),
        });
    }
    if tx.owner() != key.owner() {
        return Err(SigningError::OwnerMismatch);
    }

    let hash = deep_hash(&tx)?;
    let raw_signature = signatures::sign(key, &hash)?;
    let id = base64url::encode(&sha256(&raw_signature));

    tracing::debug!(%id, scheme = SIGNATURE_SCHEME, data_size = tx.data_size(), "transaction signed");
    tx.set_signature(base64url::encode(&raw_signature), id);
    Ok(tx)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
