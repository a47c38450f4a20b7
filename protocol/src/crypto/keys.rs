//! # Key Management
//!
//! Loads the RSA wallet key that signs transactions.
//!
//! Wallet keys are stored as JSON Web Keys: every RSA parameter is a
//! base64url big-endian integer under its JWK name (`n`, `e`, `d`, `p`,
//! `q`, `dp`, `dq`, `qi`). The modulus doubles as the wallet's on-chain
//! identity: its base64url form is the transaction `owner`, and the
//! SHA-256 of its bytes is the wallet address.
//!
//! ## Consistency is checked, not assumed
//!
//! A JWK carries redundant parameters. A file with a `p` or `q` that does not
//! multiply to `n`, or with stale CRT values, still "loads" in lenient
//! libraries and then produces signatures nobody can verify. We refuse it up
//! front with [`KeyError::Consistency`].
//!
//! ## Security considerations
//!
//! - Decoded private parameters live in `Zeroizing` buffers and are wiped as
//!   soon as the key is assembled.
//! - `RsaPrivateKey` zeroizes itself on drop, so dropping a [`KeyMaterial`]
//!   releases the secret on every exit path.
//! - Key bytes are never logged and never appear in `Debug` output.

use std::fmt;
use std::path::{Path, PathBuf};

use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::Deserialize;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::base64url;
use super::hash::sha256;

/// Errors that can occur while loading key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// A parameter is missing, empty or not base64url, or the document is
    /// not a JWK at all.
    #[error("malformed key field `{field}`: {reason}")]
    Format { field: &'static str, reason: String },

    /// The parameters parse but do not describe one valid RSA key.
    #[error("inconsistent RSA key: {0}")]
    Consistency(String),

    /// The key file could not be read.
    #[error("cannot read key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KeyError {
    fn format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            field,
            reason: reason.into(),
        }
    }
}

/// The JSON Web Key document a wallet is stored as.
///
/// All fields are optional at the serde level so that a missing parameter
/// is reported by name instead of as a generic parse failure. The whole
/// document is wiped on drop.
#[derive(Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Jwk {
    #[serde(default)]
    pub kty: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
    #[serde(default)]
    pub d: Option<String>,
    #[serde(default)]
    pub p: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub dp: Option<String>,
    #[serde(default)]
    pub dq: Option<String>,
    #[serde(default)]
    pub qi: Option<String>,
}

impl fmt::Debug for Jwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwk")
            .field("kty", &self.kty)
            .field("n", &self.n)
            .finish_non_exhaustive()
    }
}

/// A loaded, validated RSA signing key plus the public modulus it signs as.
///
/// Read-only after construction and `Send + Sync`, so one `KeyMaterial` can
/// back any number of concurrent signing operations by shared reference.
///
/// # Examples
///
/// ```no_run
/// use weavetx_protocol::crypto::keys::KeyMaterial;
///
/// let key = KeyMaterial::from_file("wallet.json").unwrap();
/// println!("signing as {}", key.address());
/// ```
pub struct KeyMaterial {
    private_key: RsaPrivateKey,
    /// Big-endian modulus bytes exactly as they appeared in the key file.
    modulus: Vec<u8>,
    /// `base64url(modulus)`, the transaction `owner` field.
    owner: String,
}

impl KeyMaterial {
    /// Assemble a key from a parsed JWK, checking every redundant parameter.
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, KeyError> {
        if let Some(kty) = jwk.kty.as_deref() {
            if kty != "RSA" {
                return Err(KeyError::format("kty", format!("expected RSA, got {kty}")));
            }
        }

        let modulus = decode_field("n", jwk.n.as_deref())?;
        let n = BigUint::from_bytes_be(&modulus);
        let e = BigUint::from_bytes_be(&decode_field("e", jwk.e.as_deref())?);
        let d = decode_secret("d", jwk.d.as_deref())?;
        let p = decode_secret("p", jwk.p.as_deref())?;
        let q = decode_secret("q", jwk.q.as_deref())?;
        let dp = decode_secret("dp", jwk.dp.as_deref())?;
        let dq = decode_secret("dq", jwk.dq.as_deref())?;
        let qi = decode_secret("qi", jwk.qi.as_deref())?;

        let one = BigUint::from(1u32);
        if p <= one || q <= one {
            return Err(KeyError::Consistency("prime factor must exceed 1".into()));
        }
        if &p * &q != n {
            return Err(KeyError::Consistency(
                "modulus is not the product of p and q".into(),
            ));
        }
        if dp != &d % (&p - &one) {
            return Err(KeyError::Consistency("dp does not equal d mod (p - 1)".into()));
        }
        if dq != &d % (&q - &one) {
            return Err(KeyError::Consistency("dq does not equal d mod (q - 1)".into()));
        }
        if (&qi * &q) % &p != one {
            return Err(KeyError::Consistency("qi is not the inverse of q mod p".into()));
        }

        let private_key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
            .map_err(|err| KeyError::Consistency(err.to_string()))?;
        private_key
            .validate()
            .map_err(|err| KeyError::Consistency(err.to_string()))?;

        let owner = base64url::encode(&modulus);
        tracing::debug!(
            bits = private_key.n().bits(),
            owner_len = owner.len(),
            "wallet key loaded"
        );

        Ok(Self {
            private_key,
            modulus,
            owner,
        })
    }

    /// Parse a JWK document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, KeyError> {
        let jwk: Jwk =
            serde_json::from_str(json).map_err(|err| KeyError::format("jwk", err.to_string()))?;
        Self::from_jwk(&jwk)
    }

    /// Read and parse a JWK file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let text = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            KeyError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?);
        Self::from_json(&text)
    }

    /// The base64url modulus, used verbatim as a transaction's `owner`.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Raw big-endian modulus bytes.
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Wallet address: `base64url(SHA-256(modulus))`.
    pub fn address(&self) -> String {
        base64url::encode(&sha256(&self.modulus))
    }

    /// Modulus size in bits.
    pub fn modulus_bits(&self) -> usize {
        self.private_key.n().bits()
    }

    /// The public half, for verification.
    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public parts only.
        write!(
            f,
            "KeyMaterial(bits={}, address={})",
            self.modulus_bits(),
            self.address()
        )
    }
}

fn decode_field(field: &'static str, value: Option<&str>) -> Result<Vec<u8>, KeyError> {
    let value = value.ok_or_else(|| KeyError::format(field, "missing"))?;
    if value.is_empty() {
        return Err(KeyError::format(field, "empty"));
    }
    base64url::decode(value).map_err(|err| KeyError::format(field, err.to_string()))
}

fn decode_secret(field: &'static str, value: Option<&str>) -> Result<BigUint, KeyError> {
    let bytes = Zeroizing::new(decode_field(field, value)?);
    Ok(BigUint::from_bytes_be(&bytes))
}
