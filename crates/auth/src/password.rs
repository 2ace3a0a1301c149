//! bcrypt password hashing.

use crate::AuthError;

/// Work factor for new hashes.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(plain, BCRYPT_COST)?)
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(plain, hash)?)
}
