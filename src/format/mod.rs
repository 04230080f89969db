//! Stored verifier format.
//!
//! A verifier is a single line of text:
//! ```text
//! hex(SALT) (32) | ':' | hex(KEY) (64)
//! ```
//! Lowercase hex, no version tag. The derivation parameters are implied.

use std::fmt;

use serde::Serialize;

use crate::crypto::{KEY_LEN, SALT_LEN};
use crate::error::VerifierError;

/// Separator between the salt and key segments.
pub const SEPARATOR: char = ':';
/// Length of a canonical verifier string.
pub const CANONICAL_LEN: usize = SALT_LEN * 2 + 1 + KEY_LEN * 2;

/// A stored credential verifier, `hex(salt):hex(key)`.
///
/// Treat it as opaque: persist it as-is and hand it back to
/// [`crate::verify`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Verifier(String);

impl Verifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Verifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders salt and derived key into a verifier.
pub fn render(salt: &[u8; SALT_LEN], key: &[u8; KEY_LEN]) -> Verifier {
    let mut out = String::with_capacity(CANONICAL_LEN);
    out.push_str(&hex::encode(salt));
    out.push(SEPARATOR);
    out.push_str(&hex::encode(key));
    Verifier(out)
}

/// Returns `true` if `s` has exactly the shape [`render`] produces.
pub fn is_canonical(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == CANONICAL_LEN
        && bytes.iter().enumerate().all(|(i, &b)| {
            if i == SALT_LEN * 2 {
                b == SEPARATOR as u8
            } else {
                b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
            }
        })
}

/// The two segments of a stored verifier, as `verify` needs them.
///
/// The key segment is kept as text; it is compared, never decoded.
#[derive(Debug)]
pub struct VerifierParts<'a> {
    salt: [u8; SALT_LEN],
    key_hex: &'a str,
}

impl<'a> VerifierParts<'a> {
    /// Splits `stored` on the first separator and decodes the salt.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::MalformedVerifier`] if:
    /// - there is no separator
    /// - the salt segment is empty, odd-length, contains non-hex
    ///   characters or does not decode to 16 bytes
    /// - the key segment is empty
    pub fn parse(stored: &'a str) -> Result<Self, VerifierError> {
        let (salt_hex, key_hex) = stored
            .split_once(SEPARATOR)
            .ok_or(VerifierError::MalformedVerifier("missing key segment"))?;

        if salt_hex.is_empty() {
            return Err(VerifierError::MalformedVerifier("empty salt segment"));
        }

        let salt = hex::decode(salt_hex)
            .map_err(|_| VerifierError::MalformedVerifier("salt is not a sequence of hex bytes"))?;
        let salt: [u8; SALT_LEN] = salt
            .as_slice()
            .try_into()
            .map_err(|_| VerifierError::MalformedVerifier("salt must decode to 16 bytes"))?;

        if key_hex.is_empty() {
            return Err(VerifierError::MalformedVerifier("missing key segment"));
        }

        Ok(Self { salt, key_hex })
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn key_hex(&self) -> &'a str {
        self.key_hex
    }
}
