use super::SALT_LEN;
use crate::error::VerifierError;
use getrandom::fill;

/// Source of salt bytes for [`crate::CredentialVerifier`].
pub trait SaltSource {
    /// Fill `buf` completely or fail.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), VerifierError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SaltSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), VerifierError> {
        fill(buf).map_err(|e| {
            tracing::error!(error = %e, "OS random generator failed");
            VerifierError::RandomUnavailable
        })
    }
}

/// Hands out the same salt on every draw. Only meant for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSalt([u8; SALT_LEN]);

impl FixedSalt {
    pub fn new(salt: [u8; SALT_LEN]) -> Self {
        Self(salt)
    }
}

impl SaltSource for FixedSalt {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), VerifierError> {
        if buf.len() != SALT_LEN {
            return Err(VerifierError::InvalidSaltLength(buf.len()));
        }
        buf.copy_from_slice(&self.0);
        Ok(())
    }
}

/// Generate salt
pub fn generate_salt<S: SaltSource + ?Sized>(
    source: &mut S,
) -> Result<[u8; SALT_LEN], VerifierError> {
    let mut salt = [0u8; SALT_LEN];
    source.fill(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Broken;

    impl SaltSource for Broken {
        fn fill(&mut self, _buf: &mut [u8]) -> Result<(), VerifierError> {
            Err(VerifierError::RandomUnavailable)
        }
    }

    #[test]
    fn os_salts_do_not_collide() {
        let mut rng = OsRandom;
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_salt(&mut rng).unwrap()));
        }
    }

    #[test]
    fn fixed_salt_repeats() {
        let mut src = FixedSalt::new([9u8; SALT_LEN]);
        assert_eq!(generate_salt(&mut src).unwrap(), [9u8; SALT_LEN]);
        assert_eq!(generate_salt(&mut src).unwrap(), [9u8; SALT_LEN]);
    }

    #[test]
    fn source_failure_propagates() {
        assert_eq!(
            generate_salt(&mut Broken),
            Err(VerifierError::RandomUnavailable)
        );
    }
}
