//! Password hashing with bcrypt

use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password does not match")]
    Mismatch,

    #[error("hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password for storage
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    Ok(hash(plaintext, DEFAULT_COST)?)
}

/// Verify a plaintext password against a stored hash
///
/// A wrong password yields `Mismatch`; a malformed or absent hash surfaces as
/// `Hash`, which callers report generically.
pub fn verify_password(stored_hash: &str, plaintext: &str) -> Result<(), PasswordError> {
    if verify(plaintext, stored_hash)? {
        Ok(())
    } else {
        Err(PasswordError::Mismatch)
    }
}
