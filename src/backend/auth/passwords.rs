//! Password hashing with bcrypt

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plain-text password for storage
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a plain-text password against a stored hash
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}
