//! Salted PBKDF2-HMAC-SHA256 credential verifiers.
//!
//! [`derive`] turns a plaintext credential into a [`Verifier`] string that is
//! safe to store; [`verify`] checks a later attempt against it.
//!
//! ```no_run
//! let stored = credhash::derive(b"mySecurePassword123")?;
//! assert!(credhash::verify(stored.as_str(), b"mySecurePassword123")?);
//! assert!(!credhash::verify(stored.as_str(), b"wrongPassword")?);
//! # Ok::<(), credhash::VerifierError>(())
//! ```

mod crypto;
mod error;
mod format;
mod storage;

pub use crate::crypto::{FixedSalt, ITERATIONS, KEY_LEN, OsRandom, SALT_LEN, SaltSource};
pub use crate::error::VerifierError;
pub use crate::format::{Verifier, VerifierParts, is_canonical};
pub use crate::storage::{VerifierFile, default_verifier_file};

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Derives and checks verifiers, drawing salts from `S`.
#[derive(Debug, Clone, Default)]
pub struct CredentialVerifier<S = OsRandom> {
    source: S,
}

impl CredentialVerifier<OsRandom> {
    pub fn new() -> Self {
        Self { source: OsRandom }
    }
}

impl<S: SaltSource> CredentialVerifier<S> {
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Derives a verifier with a fresh salt from the salt source.
    ///
    /// Empty credentials are accepted; rejecting them is a policy decision
    /// for the caller.
    pub fn derive(&mut self, credential: &[u8]) -> Result<Verifier, VerifierError> {
        let salt = crypto::generate_salt(&mut self.source)?;
        Ok(derive_with_salt_array(credential, &salt))
    }

    /// Derives a verifier with a caller-supplied salt.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::InvalidSaltLength`] unless `salt` is 16 bytes.
    pub fn derive_with_salt(
        &self,
        credential: &[u8],
        salt: &[u8],
    ) -> Result<Verifier, VerifierError> {
        derive_with_salt(credential, salt)
    }

    /// Checks `attempt` against a stored verifier.
    pub fn verify(&self, stored: &str, attempt: &[u8]) -> Result<bool, VerifierError> {
        verify(stored, attempt)
    }
}

/// Derives a verifier for `credential` with a salt from the OS CSPRNG.
///
/// Two calls with the same credential return different verifiers.
///
/// # Errors
///
/// Returns [`VerifierError::RandomUnavailable`] if the OS random generator fails.
pub fn derive(credential: &[u8]) -> Result<Verifier, VerifierError> {
    CredentialVerifier::new().derive(credential)
}

/// Derives a verifier with an explicit salt. Same inputs, same output.
pub fn derive_with_salt(credential: &[u8], salt: &[u8]) -> Result<Verifier, VerifierError> {
    let salt: &[u8; SALT_LEN] = salt
        .try_into()
        .map_err(|_| VerifierError::InvalidSaltLength(salt.len()))?;
    Ok(derive_with_salt_array(credential, salt))
}

fn derive_with_salt_array(credential: &[u8], salt: &[u8; SALT_LEN]) -> Verifier {
    let key = crypto::derive_key(credential, salt);
    let verifier = format::render(salt, &key);
    tracing::debug!("derived credential verifier");
    verifier
}

/// Checks `attempt` against a verifier produced by [`derive`].
///
/// A wrong attempt is `Ok(false)`. An unreadable verifier is an error, so
/// corrupted stored data stays distinguishable from a failed login.
///
/// # Errors
///
/// Returns [`VerifierError::MalformedVerifier`] if `stored` does not split
/// into a hex salt segment and a non-empty key segment. The salt segment must
/// decode to exactly 16 bytes; verifiers with shorter or longer salts are
/// rejected as malformed rather than checked.
pub fn verify(stored: &str, attempt: &[u8]) -> Result<bool, VerifierError> {
    let parts = VerifierParts::parse(stored)?;

    let candidate = crypto::derive_key(attempt, parts.salt());
    let candidate_hex = Zeroizing::new(hex::encode(&candidate[..]));

    let expected = parts.key_hex().as_bytes();
    let matched = candidate_hex.len() == expected.len()
        && bool::from(candidate_hex.as_bytes().ct_eq(expected));

    tracing::debug!(matched, "checked credential against verifier");
    Ok(matched)
}
