//! Auth-level error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password or old-password check failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token is missing, malformed, or expired.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The token is valid but the role is not allowed here.
    #[error("role '{0}' is not permitted for this operation")]
    Forbidden(String),

    /// bcrypt failed (bad cost, malformed hash).
    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}
