//! Cryptographic primitives for credential verifiers.
//!
//! Provides salt generation and the PBKDF2 key derivation.

pub mod kdf;
pub mod random;

pub use kdf::derive_key;
pub use random::{FixedSalt, OsRandom, SaltSource, generate_salt};

/// Length of the salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the derived key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// PBKDF2 rounds per derivation. Lowering this weakens every stored verifier.
pub const ITERATIONS: u32 = 100_000;
