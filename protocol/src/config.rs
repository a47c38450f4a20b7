//! # Protocol Configuration & Constants
//!
//! Every magic number the canonical hash and the node API depend on lives
//! here. The hash labels and the chunk order are part of the wire contract:
//! changing any of them produces transactions that nodes reject.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Transaction Format
// ---------------------------------------------------------------------------

/// Transaction format version. Only format 2 is produced and accepted.
pub const TX_FORMAT: u8 = 2;

/// Largest payload the single-chunk canonical hash can commit to.
///
/// Anything bigger needs the chunked Merkle data root, which this crate does
/// not implement, so the builder rejects it instead of mis-hashing it.
pub const MAX_SINGLE_CHUNK_SIZE: usize = 256 * 1024;

/// Quantity used when the caller does not transfer tokens.
pub const DEFAULT_QUANTITY: &str = "0";

/// Fee used by the builder until one is supplied.
pub const DEFAULT_REWARD: &str = "0";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Signature scheme the network's verifier expects. Not a free choice.
pub const SIGNATURE_SCHEME: &str = "RSA-PKCS1-v1_5-SHA384";

/// Output length of the deep hash (SHA-384).
pub const DEEP_HASH_LENGTH: usize = 48;

/// Output length of the data root and transaction id digests (SHA-256).
pub const ID_HASH_LENGTH: usize = 32;

/// Public exponent assumed when a key is rebuilt from `owner` alone.
pub const OWNER_PUBLIC_EXPONENT: u32 = 65_537;

// ---------------------------------------------------------------------------
// Canonical Hash Labels
// ---------------------------------------------------------------------------
//
// One label per field, prepended to the field bytes before the intermediate
// SHA-384. Listed in hashing order.

pub const LABEL_FORMAT: &[u8] = b"format";
pub const LABEL_OWNER: &[u8] = b"owner";
pub const LABEL_TARGET: &[u8] = b"target";
pub const LABEL_QUANTITY: &[u8] = b"quantity";
pub const LABEL_REWARD: &[u8] = b"reward";
pub const LABEL_LAST_TX: &[u8] = b"last_tx";
pub const LABEL_TAGS: &[u8] = b"tags";
pub const LABEL_DATA_SIZE: &[u8] = b"data_size";
pub const LABEL_DATA_ROOT: &[u8] = b"data_root";

// ---------------------------------------------------------------------------
// Node API
// ---------------------------------------------------------------------------

/// Default node endpoint. A local test gateway, not a public one.
pub const DEFAULT_NODE_URL: &str = "http://localhost:1984";

/// Path of the anchor endpoint.
pub const ANCHOR_PATH: &str = "tx_anchor";

/// Path prefix of the price endpoint; the byte count is appended.
pub const PRICE_PATH: &str = "price";

/// Path of the submission endpoint.
pub const SUBMIT_PATH: &str = "tx";

/// HTTP statuses `POST /tx` answers with when the node took the transaction.
/// 208 means the node already has it, which is still success for an
/// at-most-once submitter.
pub const ACCEPTED_SUBMIT_STATUSES: &[u16] = &[200, 202, 208];

/// Whole-request timeout for node calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// TCP/TLS connect timeout for node calls.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
