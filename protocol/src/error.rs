//! Crate-level error type.
//!
//! Each module keeps its own error enum; [`Error`] wraps them so callers of
//! the end-to-end flow can use a single `?`.

use thiserror::Error;

use crate::crypto::base64url::EncodingError;
use crate::crypto::keys::KeyError;
use crate::crypto::signatures::SignatureError;
use crate::network::client::NetworkError;
use crate::transaction::signing::SigningError;
use crate::transaction::types::ValidationError;
use crate::transaction::verification::VerificationError;

/// Any failure the library can report.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// `Result` with [`Error`] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;
