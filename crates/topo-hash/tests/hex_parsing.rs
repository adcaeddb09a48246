//! Property tests for object id parsing.

use proptest::prelude::*;
use topo_hash::{HashAlgorithm, ObjectId};

proptest! {
    #[test]
    fn any_sha1_digest_survives_display(bytes in proptest::array::uniform20(any::<u8>())) {
        let oid = ObjectId::Sha1(bytes);
        let hex = oid.to_string();
        prop_assert_eq!(hex.len(), 40);
        prop_assert_eq!(ObjectId::from_hex(&hex).unwrap(), oid);
    }

    #[test]
    fn ordering_matches_hex_ordering(
        a in proptest::array::uniform20(any::<u8>()),
        b in proptest::array::uniform20(any::<u8>()),
    ) {
        let (a, b) = (ObjectId::Sha1(a), ObjectId::Sha1(b));
        prop_assert_eq!(a.cmp(&b), a.to_hex().cmp(&b.to_hex()));
    }

    #[test]
    fn non_hex_lengths_rejected(s in "[0-9a-f]{0,80}") {
        prop_assume!(s.len() != 40 && s.len() != 64);
        prop_assert!(ObjectId::from_hex(&s).is_err());
    }
}

#[test]
fn sha256_id_reports_algorithm() {
    let oid = ObjectId::from_hex(&"ab".repeat(32)).unwrap();
    assert_eq!(oid.algorithm(), HashAlgorithm::Sha256);
    assert_eq!(oid.as_bytes().len(), 32);
}
