// src/auth/password.rs

//! Password hashing and verification
//!
//! Passwords are stored as Argon2 PHC strings with a fresh random salt
//! per hash. Verification runs through the argon2 crate, which compares
//! digests in constant time.

use crate::error::{Error, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::PasswordHash(format!("Invalid stored hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::PasswordHash(format!(
            "Failed to verify password: {e}"
        ))),
    }
}
