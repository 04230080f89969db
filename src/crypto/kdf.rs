use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::{ITERATIONS, KEY_LEN, SALT_LEN};

/// Derive the 32-byte verifier key from a credential with PBKDF2-HMAC-SHA256.
pub fn derive_key(credential: &[u8], salt: &[u8; SALT_LEN]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_sha256(credential, salt, ITERATIONS, &mut key[..]);
    key
}

fn pbkdf2_sha256(credential: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    let _span = tracing::debug_span!("pbkdf2", rounds, out_len = out.len()).entered();
    pbkdf2_hmac::<Sha256>(credential, salt, rounds, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; SALT_LEN];

        let k1 = derive_key(b"password", &salt);
        let k2 = derive_key(b"password", &salt);

        assert_eq!(*k1, *k2);
    }

    #[test]
    fn kdf_salt_affects_output() {
        let k1 = derive_key(b"pw", &[7u8; SALT_LEN]);
        let k2 = derive_key(b"pw", &[8u8; SALT_LEN]);

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn kdf_credential_affects_output() {
        let salt = [7u8; SALT_LEN];

        let k1 = derive_key(b"pw1", &salt);
        let k2 = derive_key(b"pw2", &salt);

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn kdf_accepts_empty_credential() {
        let key = derive_key(b"", &[0u8; SALT_LEN]);
        assert_ne!(*key, [0u8; KEY_LEN]);
    }

    // RFC 7914 section 11: P = "passwd", S = "salt", c = 1.
    #[test]
    fn pbkdf2_sha256_known_answer() {
        let mut out = [0u8; KEY_LEN];
        pbkdf2_sha256(b"passwd", b"salt", 1, &mut out);

        assert_eq!(
            hex::encode(out),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn iteration_count_is_not_reduced() {
        assert_eq!(ITERATIONS, 100_000);
    }
}
