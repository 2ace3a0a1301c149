//! `auth` crate — password hashing and bearer-token primitives.
//!
//! Pure credential mechanics: bcrypt hash/verify and HS256 JWT
//! issue/verify.  The login/register flows that combine these with the
//! users table live in the `api` crate.

pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, TokenKeys};
