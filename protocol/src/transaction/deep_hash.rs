//! Canonical ("deep") hash of a transaction.
//!
//! The node recomputes this digest from the fields it receives and checks
//! the signature against it, so it must be reproduced byte for byte:
//!
//! ```text
//! chunks  = [(label_i, bytes_i)]                 in the fixed order below
//! h_i     = SHA-384(label_i ‖ bytes_i)
//! result  = SHA-384(h_1 ‖ h_2 ‖ … ‖ h_k)
//! ```
//!
//! | # | label       | bytes                                             |
//! |---|-------------|---------------------------------------------------|
//! | 1 | `format`    | ASCII decimal of the format (`"2"`)               |
//! | 2 | `owner`     | base64url-decoded modulus                         |
//! | 3 | `target`    | base64url-decoded target, **chunk absent if empty** |
//! | 4 | `quantity`  | ASCII decimal                                     |
//! | 5 | `reward`    | ASCII decimal                                     |
//! | 6 | `last_tx`   | base64url-decoded anchor (empty bytes if none)    |
//! | 7 | `tags`      | [`encode_tags`]                                   |
//! | 8 | `data_size` | ASCII decimal                                     |
//! | 9 | `data_root` | base64url-decoded root (empty bytes if none)      |
//!
//! The order is protocol-defined; it is neither alphabetical nor the struct's
//! declaration order nor the order a caller happened to set fields in.
//!
//! The data root here is a single SHA-256 over the whole payload. That only
//! equals the chunked Merkle root for payloads of one chunk, which is why the
//! builder refuses anything above [`crate::config::MAX_SINGLE_CHUNK_SIZE`].

use super::builder::Transaction;
use super::types::{decode_field, Tag, ValidationError};
use crate::config::{
    DEEP_HASH_LENGTH, LABEL_DATA_ROOT, LABEL_DATA_SIZE, LABEL_FORMAT, LABEL_LAST_TX,
    LABEL_OWNER, LABEL_QUANTITY, LABEL_REWARD, LABEL_TAGS, LABEL_TARGET, TX_FORMAT,
};
use crate::crypto::hash::{sha384, sha384_multi};

/// One labelled field of the canonical hash input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub label: &'static [u8],
    pub bytes: Vec<u8>,
}

impl Chunk {
    fn new(label: &'static [u8], bytes: Vec<u8>) -> Self {
        Self { label, bytes }
    }

    /// `SHA-384(label ‖ bytes)`.
    pub fn digest(&self) -> [u8; DEEP_HASH_LENGTH] {
        sha384_multi(&[self.label, self.bytes.as_slice()])
    }
}

fn length_prefix(len: usize) -> Result<[u8; 4], ValidationError> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| ValidationError::TagTooLarge(len))
}

/// Deterministic binary encoding of an ordered tag list.
///
/// `u32` LE tag count, then for each tag in order: `u32` LE name length,
/// name bytes, `u32` LE value length, value bytes. Lengths are prefixed so
/// that `("ab", "c")` and `("a", "bc")` can never encode alike.
pub fn encode_tags(tags: &[Tag]) -> Result<Vec<u8>, ValidationError> {
    let payload: usize = tags.iter().map(|t| 8 + t.name.len() + t.value.len()).sum();
    let mut buf = Vec::with_capacity(4 + payload);

    buf.extend_from_slice(&length_prefix(tags.len())?);
    for tag in tags {
        buf.extend_from_slice(&length_prefix(tag.name.len())?);
        buf.extend_from_slice(tag.name.as_bytes());
        buf.extend_from_slice(&length_prefix(tag.value.len())?);
        buf.extend_from_slice(tag.value.as_bytes());
    }

    Ok(buf)
}

/// The canonical, ordered chunk list for `tx`.
///
/// Fails if a binary field is not base64url or the record declares a format
/// other than 2. Signature and id are never part of the input.
pub fn canonical_chunks(tx: &Transaction) -> Result<Vec<Chunk>, ValidationError> {
    if tx.format() != TX_FORMAT {
        return Err(ValidationError::UnsupportedFormat(tx.format()));
    }

    let mut chunks = Vec::with_capacity(9);
    chunks.push(Chunk::new(LABEL_FORMAT, tx.format().to_string().into_bytes()));
    chunks.push(Chunk::new(LABEL_OWNER, decode_field("owner", tx.owner())?));
    if !tx.target().is_empty() {
        chunks.push(Chunk::new(LABEL_TARGET, decode_field("target", tx.target())?));
    }
    chunks.push(Chunk::new(LABEL_QUANTITY, tx.quantity().as_bytes().to_vec()));
    chunks.push(Chunk::new(LABEL_REWARD, tx.fee().as_bytes().to_vec()));
    chunks.push(Chunk::new(LABEL_LAST_TX, decode_field("last_tx", tx.last_tx())?));
    chunks.push(Chunk::new(LABEL_TAGS, encode_tags(tx.tags())?));
    chunks.push(Chunk::new(LABEL_DATA_SIZE, tx.data_size().as_bytes().to_vec()));
    chunks.push(Chunk::new(LABEL_DATA_ROOT, decode_field("data_root", tx.data_root())?));

    Ok(chunks)
}

/// Final digest over an already-assembled chunk list.
pub fn hash_chunks(chunks: &[Chunk]) -> [u8; DEEP_HASH_LENGTH] {
    let mut acc = Vec::with_capacity(chunks.len() * DEEP_HASH_LENGTH);
    for chunk in chunks {
        acc.extend_from_slice(&chunk.digest());
    }
    sha384(&acc)
}

/// The 48-byte canonical hash the signature covers.
pub fn deep_hash(tx: &Transaction) -> Result<[u8; DEEP_HASH_LENGTH], ValidationError> {
    let chunks = canonical_chunks(tx)?;
    tracing::debug!(chunks = chunks.len(), "computing deep hash");
    Ok(hash_chunks(&chunks))
}
