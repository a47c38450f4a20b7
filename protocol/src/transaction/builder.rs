//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] merges caller-supplied fields with protocol
//! defaults, validates everything, derives `data_size` and `data_root` from
//! the payload, and hands back an unsigned [`Transaction`].
//!
//! The builder does not sign; that happens in [`super::signing`]. This
//! separation keeps construction testable without key material.

use serde::{Deserialize, Serialize};

use super::types::{decode_field, validate_decimal, Tag, ValidationError};
use crate::config::{DEFAULT_QUANTITY, DEFAULT_REWARD, MAX_SINGLE_CHUNK_SIZE, TX_FORMAT};
use crate::crypto::base64url;
use crate::crypto::hash::sha256;
use crate::crypto::keys::KeyMaterial;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A format-2 weave transaction.
///
/// Field names and JSON layout match the node's `POST /tx` body: the signed
/// record is its own wire format. Binary fields are base64url strings,
/// numbers are decimal strings, and `format` is a bare number.
///
/// Fields are read-only from outside the crate. The only way to set `id`
/// and `signature` is [`super::signing::sign_transaction`], which consumes
/// an unsigned record and returns a signed one, so a signed record cannot
/// be edited in place and keep its signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    format: u8,
    /// `base64url(SHA-256(signature))`; empty until signed.
    id: String,
    /// Anchor token from `GET /tx_anchor`; may be empty.
    last_tx: String,
    /// `base64url(modulus)` of the signing key.
    owner: String,
    tags: Vec<Tag>,
    /// Recipient address for token transfers; empty for none.
    target: String,
    /// Tokens transferred to `target`, in winston.
    quantity: String,
    #[serde(with = "base64url_bytes")]
    data: Vec<u8>,
    data_size: String,
    /// `base64url(SHA-256(data))`, or empty when there is no payload.
    data_root: String,
    /// Fee paid to the network, in winston.
    reward: String,
    /// `base64url` RSA signature; empty until signed.
    signature: String,
}

impl Transaction {
    pub fn format(&self) -> u8 {
        self.format
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn last_tx(&self) -> &str {
        &self.last_tx
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// The fee, called `reward` on the wire.
    pub fn fee(&self) -> &str {
        &self.reward
    }

    /// The payload bytes (empty when there is none).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_size(&self) -> &str {
        &self.data_size
    }

    pub fn data_root(&self) -> &str {
        &self.data_root
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Returns `true` once signature and id are populated.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Serializes the record as the JSON body `POST /tx` expects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a record received as JSON. No signature check is performed;
    /// see [`super::verification::verify_transaction`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Installs signature and id together. Only the signer calls this.
    pub(crate) fn set_signature(&mut self, signature: String, id: String) {
        self.signature = signature;
        self.id = id;
    }
}

/// `(data_size, data_root)` for a payload. Empty payloads commit to
/// nothing: size `"0"`, empty root.
pub fn derive_data_fields(data: &[u8]) -> (String, String) {
    let size = data.len().to_string();
    if data.is_empty() {
        (size, String::new())
    } else {
        (size, base64url::encode(&sha256(data)))
    }
}

mod base64url_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::crypto::base64url;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64url::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        base64url::decode(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`] instances.
///
/// # Usage
///
/// ```rust,no_run
/// use weavetx_protocol::crypto::keys::KeyMaterial;
/// use weavetx_protocol::transaction::TransactionBuilder;
///
/// let key = KeyMaterial::from_file("wallet.json").unwrap();
/// let tx = TransactionBuilder::for_key(&key)
///     .last_tx("abc")
///     .reward("100")
///     .tag("Content-Type", "text/plain")
///     .data(b"hello".to_vec())
///     .build()
///     .unwrap();
/// assert_eq!(tx.data_size(), "5");
/// ```
///
/// Defaults: quantity `"0"`, reward `"0"`, no target, no anchor, no tags,
/// no payload. The order setters are called in has no effect on the hash;
/// only the order of tags does.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    owner: String,
    last_tx: String,
    target: String,
    quantity: String,
    reward: String,
    tags: Vec<Tag>,
    data: Vec<u8>,
    declared_data_size: Option<u64>,
}

impl TransactionBuilder {
    /// Creates a builder for a record owned by the given base64url modulus.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            last_tx: String::new(),
            target: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
            reward: DEFAULT_REWARD.to_string(),
            tags: Vec::new(),
            data: Vec::new(),
            declared_data_size: None,
        }
    }

    /// Creates a builder owned by `key`'s modulus.
    pub fn for_key(key: &KeyMaterial) -> Self {
        Self::new(key.owner())
    }

    /// Sets the anchor returned by `GET /tx_anchor`.
    pub fn last_tx(mut self, anchor: &str) -> Self {
        self.last_tx = anchor.to_string();
        self
    }

    /// Sets the recipient address of a token transfer.
    pub fn target(mut self, address: &str) -> Self {
        self.target = address.to_string();
        self
    }

    /// Sets the number of winston transferred to the target.
    pub fn quantity(mut self, winston: &str) -> Self {
        self.quantity = winston.to_string();
        self
    }

    /// Sets the fee in winston, usually from `GET /price/{bytes}`.
    pub fn reward(mut self, winston: &str) -> Self {
        self.reward = winston.to_string();
        self
    }

    /// Appends one tag.
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    /// Appends tags in iteration order.
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Attaches the payload.
    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Declares the payload size up front; `build()` fails if the payload
    /// turns out to be a different length.
    pub fn declared_data_size(mut self, size: u64) -> Self {
        self.declared_data_size = Some(size);
        self
    }

    /// Runs every check `build()` runs, without consuming the builder.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.owner.is_empty() {
            return Err(ValidationError::MissingOwner);
        }
        decode_field("owner", &self.owner)?;
        decode_field("target", &self.target)?;
        decode_field("last_tx", &self.last_tx)?;
        validate_decimal("quantity", &self.quantity)?;
        validate_decimal("reward", &self.reward)?;

        if self.data.len() > MAX_SINGLE_CHUNK_SIZE {
            return Err(ValidationError::PayloadTooLarge {
                size: self.data.len(),
                max: MAX_SINGLE_CHUNK_SIZE,
            });
        }
        if let Some(declared) = self.declared_data_size {
            if u64::try_from(self.data.len()).ok() != Some(declared) {
                return Err(ValidationError::DataSizeMismatch {
                    declared,
                    actual: self.data.len(),
                });
            }
        }
        Ok(())
    }

    /// Validates every field and produces an unsigned [`Transaction`] with
    /// `data_size` and `data_root` derived from the payload.
    pub fn build(self) -> Result<Transaction, ValidationError> {
        self.validate()?;
        let (data_size, data_root) = derive_data_fields(&self.data);

        Ok(Transaction {
            format: TX_FORMAT,
            id: String::new(),
            last_tx: self.last_tx,
            owner: self.owner,
            tags: self.tags,
            target: self.target,
            quantity: self.quantity,
            data: self.data,
            data_size,
            data_root,
            reward: self.reward,
            signature: String::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // Any valid base64url works as an owner for unsigned records.
    const OWNER: &str = "AQAB";

    fn sample_tx() -> Transaction {
        TransactionBuilder::new(OWNER)
            .last_tx("abc")
            .reward("100")
            .data(b"hello".to_vec())
            .build()
            .unwrap()
    }

    #[test]
    fn builder_applies_defaults() {
        let tx = TransactionBuilder::new(OWNER).build().unwrap();
        assert_eq!(tx.format(), 2);
        assert_eq!(tx.quantity(), "0");
        assert_eq!(tx.fee(), "0");
        assert_eq!(tx.target(), "");
        assert_eq!(tx.last_tx(), "");
        assert!(tx.tags().is_empty());
        assert!(!tx.is_signed());
        assert_eq!(tx.id(), "");
    }

    #[test]
    fn no_payload_has_empty_root_and_zero_size() {
        let tx = TransactionBuilder::new(OWNER).build().unwrap();
        assert_eq!(tx.data_size(), "0");
        assert_eq!(tx.data_root(), "");
    }

    #[test]
    fn explicit_empty_payload_matches_no_payload() {
        let tx = TransactionBuilder::new(OWNER).data(Vec::new()).build().unwrap();
        assert_eq!(tx.data_size(), "0");
        assert_eq!(tx.data_root(), "");
    }

    #[test]
    fn payload_derives_size_and_root() {
        let tx = sample_tx();
        assert_eq!(tx.data_size(), "5");
        assert_eq!(tx.data_root(), "LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ");
    }

    #[test]
    fn declared_size_must_match() {
        let err = TransactionBuilder::new(OWNER)
            .data(b"hello".to_vec())
            .declared_data_size(6)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DataSizeMismatch {
                declared: 6,
                actual: 5
            }
        );

        assert!(TransactionBuilder::new(OWNER)
            .data(b"hello".to_vec())
            .declared_data_size(5)
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_malformed_amounts() {
        let err = TransactionBuilder::new(OWNER).quantity("-1").build().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidDecimal {
                field: "quantity",
                ..
            }
        ));

        let err = TransactionBuilder::new(OWNER).reward("1.5").build().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidDecimal { field: "reward", .. }
        ));
    }

    #[test]
    fn rejects_missing_owner() {
        assert_eq!(
            TransactionBuilder::new("").build().unwrap_err(),
            ValidationError::MissingOwner
        );
    }

    #[test]
    fn rejects_non_base64url_target_and_anchor() {
        let err = TransactionBuilder::new(OWNER).target("not/valid").build().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEncoding { field: "target", .. }
        ));

        let err = TransactionBuilder::new(OWNER).last_tx("a").build().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEncoding { field: "last_tx", .. }
        ));
    }

    #[test]
    fn rejects_multi_chunk_payload() {
        let err = TransactionBuilder::new(OWNER)
            .data(vec![0u8; MAX_SINGLE_CHUNK_SIZE + 1])
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::PayloadTooLarge { .. }));
    }

    #[test]
    fn validate_leaves_the_builder_usable() {
        let draft = TransactionBuilder::new(OWNER).quantity("5");
        draft.validate().unwrap();
        let tx = draft.last_tx("abc").reward("10").build().unwrap();
        assert_eq!(tx.quantity(), "5");

        let bad = TransactionBuilder::new(OWNER).quantity("-1");
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::InvalidDecimal { field: "quantity", .. })
        ));
    }

    #[test]
    fn accepts_payload_at_chunk_limit() {
        let tx = TransactionBuilder::new(OWNER)
            .data(vec![7u8; MAX_SINGLE_CHUNK_SIZE])
            .build()
            .unwrap();
        assert_eq!(tx.data_size(), "262144");
    }

    #[test]
    fn tags_keep_insertion_order() {
        let tx = TransactionBuilder::new(OWNER)
            .tag("b", "2")
            .tag("a", "1")
            .build()
            .unwrap();
        assert_eq!(tx.tags()[0].name, "b");
        assert_eq!(tx.tags()[1].name, "a");
    }

    #[test]
    fn transaction_json_roundtrip() {
        let tx = TransactionBuilder::new(OWNER)
            .tag("Content-Type", "text/plain")
            .data(b"hello".to_vec())
            .build()
            .unwrap();
        let json = tx.to_json().unwrap();
        let recovered = Transaction::from_json(&json).unwrap();
        assert_eq!(tx, recovered);
    }

    #[test]
    fn wire_format_uses_node_field_names() {
        let value: serde_json::Value = serde_json::from_str(&sample_tx().to_json().unwrap()).unwrap();
        assert_eq!(value["format"], 2);
        assert_eq!(value["reward"], "100");
        assert_eq!(value["last_tx"], "abc");
        assert_eq!(value["data"], "aGVsbG8");
        assert_eq!(value["data_size"], "5");
        assert_eq!(value["signature"], "");
        assert!(value["tags"].as_array().unwrap().is_empty());
    }

    #[test]
    fn derive_data_fields_for_hello() {
        let (size, root) = derive_data_fields(b"hello");
        assert_eq!(size, "5");
        assert_eq!(root, "LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ");
    }
}
