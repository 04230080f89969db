//! Property tests for derive/verify.
//!
//! Every case pays for several full 100k-round derivations, so case counts
//! are kept small.

use credhash::{SALT_LEN, VerifierError, derive, derive_with_salt, is_canonical, verify};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn derive_is_deterministic_for_fixed_salt(
        credential in proptest::collection::vec(any::<u8>(), 0..64),
        salt in proptest::array::uniform16(any::<u8>()),
    ) {
        let a = derive_with_salt(&credential, &salt).unwrap();
        let b = derive_with_salt(&credential, &salt).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn derive_output_is_canonical(
        credential in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let v = derive(&credential).unwrap();
        prop_assert!(is_canonical(v.as_str()));
    }

    #[test]
    fn derived_verifier_accepts_its_credential(
        credential in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let v = derive(&credential).unwrap();
        prop_assert!(verify(v.as_str(), &credential).unwrap());
    }

    #[test]
    fn derived_verifier_rejects_other_credentials(
        c1 in proptest::collection::vec(any::<u8>(), 1..32),
        c2 in proptest::collection::vec(any::<u8>(), 1..32),
    ) {
        prop_assume!(c1 != c2);
        let v = derive(&c1).unwrap();
        prop_assert!(!verify(v.as_str(), &c2).unwrap());
    }

    #[test]
    fn fresh_salts_never_collide(
        credential in proptest::collection::vec(any::<u8>(), 1..32),
    ) {
        let a = derive(&credential).unwrap();
        let b = derive(&credential).unwrap();
        prop_assert_ne!(a, b);
    }

    #[test]
    fn strings_without_separator_are_malformed(s in "[^:]{0,80}") {
        prop_assert!(matches!(
            verify(&s, b"anything"),
            Err(VerifierError::MalformedVerifier(_))
        ));
    }

    #[test]
    fn odd_length_salts_are_malformed(salt_hex in "[0-9a-f]{1,31}", key_hex in "[0-9a-f]{64}") {
        prop_assume!(salt_hex.len() % 2 == 1);
        let stored = format!("{salt_hex}:{key_hex}");
        prop_assert!(matches!(
            verify(&stored, b"anything"),
            Err(VerifierError::MalformedVerifier(_))
        ));
    }
}

#[test]
fn concrete_scenario() {
    let stored = derive(b"mySecurePassword123").unwrap();
    assert!(is_canonical(stored.as_str()));
    assert!(verify(stored.as_str(), b"mySecurePassword123").unwrap());
    assert!(!verify(stored.as_str(), b"wrongPassword").unwrap());

    let again = derive(b"mySecurePassword123").unwrap();
    assert_ne!(stored, again);
    assert!(verify(again.as_str(), b"mySecurePassword123").unwrap());
}

#[test]
fn explicit_salt_shows_up_in_verifier() {
    let v = derive_with_salt(b"pw", &[0xc3u8; SALT_LEN]).unwrap();
    assert!(v.as_str().starts_with(&"c3".repeat(SALT_LEN)));
}
