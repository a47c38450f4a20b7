//! Transaction verification: the node's checks, run locally.
//!
//! Useful before submitting (catch a bad record without a round trip) and
//! for auditing records fetched from elsewhere. The checks are ordered from
//! cheapest to most expensive (string comparisons and SHA-256 before the RSA
//! exponentiation) to fail fast.

use thiserror::Error;

use super::builder::{derive_data_fields, Transaction};
use super::deep_hash::deep_hash;
use super::types::ValidationError;
use crate::crypto::base64url;
use crate::crypto::hash::sha256;
use crate::crypto::signatures::{self, public_key_from_owner, SignatureError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during transaction verification.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// The transaction is not signed.
    #[error("transaction is unsigned")]
    MissingSignature,

    /// `data_size` does not describe the attached payload.
    #[error("data_size mismatch: payload implies {expected}, record says {actual}")]
    DataSizeMismatch { expected: String, actual: String },

    /// `data_root` does not commit to the attached payload.
    #[error("data_root mismatch: payload implies {expected:?}, record says {actual:?}")]
    DataRootMismatch { expected: String, actual: String },

    /// The id is not the SHA-256 of the signature.
    #[error("transaction ID mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },

    /// A field cannot be decoded or hashed.
    #[error("malformed transaction: {0}")]
    Malformed(#[from] ValidationError),

    /// The signature does not verify against the owner.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),
}

/// Verifies a signed transaction the way a node would.
///
/// Checks, in order:
/// 1. signature present;
/// 2. `data_size` and `data_root` match the attached payload (skipped when
///    the record carries no payload, as with a header-only upload);
/// 3. `id == base64url(SHA-256(signature))`;
/// 4. the RSA signature verifies over the recomputed deep hash, with the
///    public key rebuilt from `owner`.
pub fn verify_transaction(tx: &Transaction) -> Result<(), VerificationError> {
    if !tx.is_signed() {
        return Err(VerificationError::MissingSignature);
    }

    if !tx.data().is_empty() {
        let (size, root) = derive_data_fields(tx.data());
        if size != tx.data_size() {
            return Err(VerificationError::DataSizeMismatch {
                expected: size,
                actual: tx.data_size().to_string(),
            });
        }
        if root != tx.data_root() {
            return Err(VerificationError::DataRootMismatch {
                expected: root,
                actual: tx.data_root().to_string(),
            });
        }
    }

    let raw_signature = base64url::decode(tx.signature()).map_err(|source| {
        ValidationError::InvalidEncoding {
            field: "signature",
            source,
        }
    })?;
    let expected_id = base64url::encode(&sha256(&raw_signature));
    if expected_id != tx.id() {
        return Err(VerificationError::IdMismatch {
            expected: expected_id,
            actual: tx.id().to_string(),
        });
    }

    let hash = deep_hash(tx)?;
    let public_key = public_key_from_owner(tx.owner())?;
    signatures::verify(&public_key, &hash, &raw_signature)?;

    tracing::debug!(id = tx.id(), "transaction verified");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
