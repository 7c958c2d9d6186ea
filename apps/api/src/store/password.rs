use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::error::PersistenceError;

/// Hashes a plaintext password into an Argon2 PHC string.
pub fn hash_password(plain: &str) -> Result<String, PersistenceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PersistenceError::Hash(e.to_string()))
}

/// Constant-time check of `plain` against a stored PHC string.
/// A malformed stored hash never verifies.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
