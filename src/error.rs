use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    MalformedVerifier(&'static str),
    InvalidSaltLength(usize),
    RandomUnavailable,
}

impl fmt::Display for VerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifierError::MalformedVerifier(reason) => write!(f, "malformed verifier: {reason}"),
            VerifierError::InvalidSaltLength(n) => {
                write!(f, "salt must be {} bytes, got {n}", crate::crypto::SALT_LEN)
            }
            VerifierError::RandomUnavailable => write!(f, "OS random generator unavailable"),
        }
    }
}

impl std::error::Error for VerifierError {}
