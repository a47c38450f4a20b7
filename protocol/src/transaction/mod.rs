//! # Transaction Module
//!
//! Construction, canonical hashing, signing and verification of format-2
//! data transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        Tags, decimal checks, ValidationError
//! builder.rs      Transaction record and the fluent TransactionBuilder
//! deep_hash.rs    Canonical labelled SHA-384 digest the signature covers
//! signing.rs      RSA signing and id derivation
//! verification.rs Local re-run of the node's acceptance checks
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] assembles and validates the fields
//!    and derives `data_size`/`data_root` from the payload.
//! 2. **Sign**: [`sign_transaction`] covers the [`deep_hash`] with the
//!    wallet key and derives the id.
//! 3. **Verify**: [`verify_transaction`] re-checks a signed record.
//! 4. **Submit**: see [`crate::network::publish`].

pub mod builder;
pub mod deep_hash;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{derive_data_fields, Transaction, TransactionBuilder};
pub use deep_hash::{deep_hash, encode_tags};
pub use signing::{sign_transaction, SigningError};
pub use types::{validate_decimal, Tag, ValidationError};
pub use verification::{verify_transaction, VerificationError};
