// Copyright (c) 2026 weavetx contributors. MIT License.
// See LICENSE for details.

//! # weavetx Core Library
//!
//! Builds, canonically hashes and RSA-signs transactions for a permanent
//! storage ("weave") network, so that any node can recompute the same hash
//! and accept the same signature.
//!
//! The interesting part is not the RSA math (the `rsa` crate does that) but
//! the byte-exact agreement with a remote verifier: every field is encoded,
//! labelled and hashed in a protocol-fixed order, and the signature uses the
//! one padding/digest pairing the network accepts. Get a single byte wrong
//! and the node silently drops your transaction.
//!
//! ## Architecture
//!
//! - **crypto**: base64url codec, SHA-2 helpers, RSA key loading and signing.
//! - **transaction**: the record, its builder, the canonical ("deep") hash,
//!   signing and independent verification.
//! - **network**: the node collaborator as an injectable trait, an HTTP
//!   implementation, and the anchor → fee → sign → submit flow.
//! - **config**: protocol constants.
//! - **error**: crate-level error aggregating the per-module taxonomies.
//!
//! ## Flow
//!
//! ```text
//! load key → get_anchor → get_price → build → deep hash → sign → id → post
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod network;
pub mod transaction;

pub use error::{Error, Result};
