//! Anchor → fee → build → sign → submit, against any [`NetworkClient`].

use super::client::{NetworkClient, SubmitStatus};
use crate::config::DEFAULT_QUANTITY;
use crate::crypto::keys::KeyMaterial;
use crate::transaction::{sign_transaction, Tag, Transaction, TransactionBuilder};
use crate::Result;

/// What the caller wants stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub data: Vec<u8>,
    pub tags: Vec<Tag>,
    /// Recipient address; empty for a plain data upload.
    pub target: String,
    /// Winston to transfer to `target`.
    pub quantity: String,
}

impl PublishRequest {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            tags: Vec::new(),
            target: String::new(),
            quantity: DEFAULT_QUANTITY.to_string(),
        }
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    pub fn with_transfer(mut self, target: impl Into<String>, quantity: impl Into<String>) -> Self {
        self.target = target.into();
        self.quantity = quantity.into();
        self
    }
}

/// A submitted record together with the node's answer.
#[derive(Debug, Clone)]
pub struct Published {
    pub transaction: Transaction,
    pub status: SubmitStatus,
}

/// Validates the request, fetches anchor and fee, then builds and signs the
/// record. Nothing is sent to the node's submit endpoint, and an invalid
/// request fails before any network call.
pub async fn prepare<C>(client: &C, key: &KeyMaterial, request: PublishRequest) -> Result<Transaction>
where
    C: NetworkClient + ?Sized,
{
    let byte_count = request.data.len() as u64;
    let draft = TransactionBuilder::for_key(key)
        .target(&request.target)
        .quantity(&request.quantity)
        .tags(request.tags)
        .data(request.data);
    draft.validate()?;

    let anchor = client.get_anchor().await?;
    let fee = client.get_price(byte_count).await?;
    if fee == "0" {
        tracing::warn!(bytes = byte_count, "node quoted a zero fee");
    }

    let tx = draft.last_tx(&anchor).reward(&fee).build()?;
    Ok(sign_transaction(tx, key)?)
}

/// [`prepare`], then a single submission.
pub async fn publish<C>(client: &C, key: &KeyMaterial, request: PublishRequest) -> Result<Published>
where
    C: NetworkClient + ?Sized,
{
    let transaction = prepare(client, key, request).await?;
    tracing::info!(id = transaction.id(), fee = transaction.fee(), "submitting transaction");
    let status = client.post_transaction(&transaction).await?;
    Ok(Published { transaction, status })
}
