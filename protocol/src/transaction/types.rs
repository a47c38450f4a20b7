//! Core value types for transactions: tags, decimal amounts, and the
//! validation errors raised while assembling a record.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::crypto::base64url::{self, EncodingError};

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A transaction field is malformed or inconsistent with the others.
///
/// Raised before any cryptographic work starts, so a failed build never
/// leaves half-derived state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `quantity`, `reward` or `data_size` is not a canonical non-negative
    /// decimal integer.
    #[error("{field} must be a non-negative decimal integer, got {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    /// The caller declared a payload size that disagrees with the payload.
    #[error("declared data_size {declared} does not match payload length {actual}")]
    DataSizeMismatch { declared: u64, actual: usize },

    /// The payload needs more than one chunk, which the single-chunk data
    /// root cannot commit to.
    #[error("payload of {size} bytes exceeds the single-chunk limit of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// A binary field is not valid base64url.
    #[error("{field} is not valid base64url: {source}")]
    InvalidEncoding {
        field: &'static str,
        #[source]
        source: EncodingError,
    },

    /// No owner was supplied.
    #[error("owner must not be empty")]
    MissingOwner,

    /// The record declares a format this crate does not hash.
    #[error("unsupported transaction format {0}")]
    UnsupportedFormat(u8),

    /// A tag or tag list is too long for its 32-bit length prefix.
    #[error("tag data too large to encode ({0} bytes)")]
    TagTooLarge(usize),
}

/// Check that `value` is a canonical non-negative decimal integer string:
/// ASCII digits only, no sign, no leading zeros (except `"0"` itself).
///
/// Nodes re-render these numbers before hashing, so `"007"` would hash
/// differently on the node than here.
pub fn validate_decimal(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let canonical = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'));
    if canonical {
        Ok(())
    } else {
        Err(ValidationError::InvalidDecimal {
            field,
            value: value.to_string(),
        })
    }
}

/// Decode a base64url field, tagging any failure with the field name.
pub(crate) fn decode_field(field: &'static str, value: &str) -> Result<Vec<u8>, ValidationError> {
    base64url::decode(value).map_err(|source| ValidationError::InvalidEncoding { field, source })
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// A `(name, value)` metadata pair attached to a transaction.
///
/// Tags are ordered: the same tags in a different order are a different
/// transaction with a different hash. On the wire both halves are base64url.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireTag", into = "WireTag")]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    /// Creates a tag from its name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Wire form of a [`Tag`]: both halves base64url-encoded.
#[derive(Serialize, Deserialize)]
struct WireTag {
    name: String,
    value: String,
}

impl From<Tag> for WireTag {
    fn from(tag: Tag) -> Self {
        Self {
            name: base64url::encode(tag.name.as_bytes()),
            value: base64url::encode(tag.value.as_bytes()),
        }
    }
}

impl TryFrom<WireTag> for Tag {
    type Error = String;

    fn try_from(wire: WireTag) -> Result<Self, Self::Error> {
        let decode = |field: &str, text: &str| -> Result<String, String> {
            let bytes = base64url::decode(text).map_err(|e| format!("tag {field}: {e}"))?;
            String::from_utf8(bytes).map_err(|e| format!("tag {field}: {e}"))
        };
        Ok(Self {
            name: decode("name", &wire.name)?,
            value: decode("value", &wire.value)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_accepts_canonical_integers() {
        for ok in ["0", "1", "100", "18446744073709551616000"] {
            assert!(validate_decimal("quantity", ok).is_ok(), "{ok}");
        }
    }

    #[test]
    fn decimal_rejects_everything_else() {
        for bad in ["", "-1", "+1", "1.5", "1e3", " 1", "007", "00", "abc"] {
            assert!(validate_decimal("reward", bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn decimal_error_names_the_field() {
        let err = validate_decimal("reward", "-5").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDecimal {
                field: "reward",
                value: "-5".into()
            }
        );
    }

    #[test]
    fn tag_wire_form_is_base64url() {
        let tag = Tag::new("Content-Type", "text/plain");
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["name"], "Q29udGVudC1UeXBl");
        assert_eq!(json["value"], "dGV4dC9wbGFpbg");
    }

    #[test]
    fn tag_json_roundtrip() {
        let tag = Tag::new("App-Name", "weavetx");
        let json = serde_json::to_string(&tag).unwrap();
        let back: Tag = serde_json::from_str(&json).unwrap();
        assert_eq!(tag, back);
    }

    #[test]
    fn tag_rejects_non_base64url_wire_value() {
        let result: Result<Tag, _> = serde_json::from_str(r#"{"name":"a+b","value":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn tag_display() {
        assert_eq!(Tag::new("k", "v").to_string(), "k=v");
    }
}
