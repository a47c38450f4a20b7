//! # Cryptographic Primitives
//!
//! Everything the signer needs below the transaction layer:
//!
//! - **base64url**: the text encoding of every binary field.
//! - **hash**: SHA-256 and SHA-384, the only two digests the protocol uses.
//! - **keys**: loading and validating the RSA wallet key.
//! - **signatures**: RSA PKCS#1 v1.5 with SHA-384, sign and verify.
//!
//! Nothing here is hand-rolled. Big-integer and padding work is the `rsa`
//! crate's; digests are `sha2`'s. This module only pins down which of their
//! knobs the network insists on.

pub mod base64url;
pub mod hash;
pub mod keys;
pub mod signatures;

pub use base64url::EncodingError;
pub use hash::{sha256, sha384, sha384_multi};
pub use keys::{Jwk, KeyError, KeyMaterial};
pub use signatures::{public_key_from_owner, sign, verify, SignatureError};
