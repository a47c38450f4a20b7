//! Property tests for the encoding layer and the canonical hash.

use proptest::prelude::*;

use weavetx_protocol::crypto::base64url;
use weavetx_protocol::transaction::{deep_hash, encode_tags, Tag, TransactionBuilder};

proptest! {
    #[test]
    fn base64url_round_trips(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let text = base64url::encode(&bytes);
        prop_assert!(!text.contains('='));
        prop_assert!(!text.contains('+') && !text.contains('/'));
        prop_assert_eq!(base64url::decode(&text).unwrap(), bytes);
    }

    #[test]
    fn padded_input_decodes_the_same(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let unpadded = base64url::encode(&bytes);
        let mut padded = unpadded.clone();
        while padded.len() % 4 != 0 {
            padded.push('=');
        }
        prop_assert_eq!(base64url::decode(&padded).unwrap(), base64url::decode(&unpadded).unwrap());
    }

    #[test]
    fn tag_encoding_length_is_exact(tags in proptest::collection::vec(("[a-zA-Z-]{0,16}", ".{0,32}"), 0..8)) {
        let tags: Vec<Tag> = tags.into_iter().map(|(n, v)| Tag::new(n, v)).collect();
        let expected: usize = 4 + tags.iter().map(|t| 8 + t.name.len() + t.value.len()).sum::<usize>();
        prop_assert_eq!(encode_tags(&tags).unwrap().len(), expected);
    }

    #[test]
    fn distinct_payloads_hash_differently(
        a in proptest::collection::vec(any::<u8>(), 0..256),
        b in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assume!(a != b);
        let hash = |data: Vec<u8>| {
            deep_hash(&TransactionBuilder::new("AQAB").data(data).build().unwrap()).unwrap()
        };
        prop_assert_ne!(hash(a), hash(b));
    }

    #[test]
    fn decimal_amounts_are_accepted(n in any::<u64>()) {
        let tx = TransactionBuilder::new("AQAB")
            .quantity(&n.to_string())
            .reward(&n.to_string())
            .build();
        prop_assert!(tx.is_ok());
    }
}
