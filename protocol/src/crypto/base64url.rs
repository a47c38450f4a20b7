//! # Base64URL Codec
//!
//! Every binary field of a transaction (owner, target, anchor, data root,
//! signature, id, payload, tags) travels as base64url text without `=`
//! padding. Decoding accepts the text with or without padding and ignores
//! non-zero trailing bits in the last symbol, so any token a node hands out
//! decodes to the same bytes the node itself would use. Characters outside
//! the URL-safe alphabet and impossible lengths are still errors.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use thiserror::Error;

/// Input was not valid base64url.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed base64url input: {0}")]
pub struct EncodingError(String);

/// Encode bytes as unpadded base64url.
///
/// # Example
///
/// ```
/// use weavetx_protocol::crypto::base64url;
///
/// assert_eq!(base64url::encode(&[0xfb, 0xff]), "-_8");
/// assert_eq!(base64url::encode(b""), "");
/// ```
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// URL-safe decoder that takes padded or unpadded input and tolerates
/// non-canonical trailing bits.
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode base64url text, padded or not.
///
/// Fails on characters outside the URL-safe alphabet and on lengths no
/// padding can repair (one leftover character).
pub fn decode(text: &str) -> Result<Vec<u8>, EncodingError> {
    LENIENT_URL_SAFE
        .decode(text)
        .map_err(|e| EncodingError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_url_safe_alphabet_without_padding() {
        // 0xfb 0xff would be "+/8=" in the standard alphabet.
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"hello"), "aGVsbG8");
    }

    #[test]
    fn decode_restores_missing_padding() {
        assert_eq!(decode("aGVsbG8").unwrap(), b"hello");
        assert_eq!(decode("aGVsbA").unwrap(), b"hell");
        assert_eq!(decode("aGVs").unwrap(), b"hel");
    }

    #[test]
    fn decode_accepts_already_padded_input() {
        assert_eq!(decode("aGVsbA==").unwrap(), b"hell");
    }

    #[test]
    fn empty_round_trip() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_standard_alphabet_symbols() {
        assert!(decode("+/8").is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("not base64!").is_err());
        assert!(decode("a b").is_err());
    }

    #[test]
    fn decode_rejects_unrepairable_length() {
        // A single trailing character carries only 6 bits.
        assert!(decode("aGVsb").is_err());
        assert!(decode("a").is_err());
    }

    #[test]
    fn short_anchor_token_decodes() {
        assert_eq!(decode("abc").unwrap(), vec![0x69, 0xb7]);
    }

    #[test]
    fn non_canonical_trailing_bits_are_ignored() {
        // "d" leaves a set bit below the last whole byte; it is dropped.
        assert_eq!(decode("abd").unwrap(), vec![0x69, 0xb7]);
        assert_eq!(decode("abd=").unwrap(), vec![0x69, 0xb7]);
        assert_eq!(decode("aGVsbH").unwrap(), b"hell");
    }
}
