//! Bearer-token extraction.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use auth::Claims;
use lifecycle::UserRole;

use crate::{ApiError, AppState};

/// The verified claims of the calling user.
///
/// Rejects with 401 when the `Authorization: Bearer …` header is missing,
/// malformed, expired, or signed with the wrong secret.
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// 403 unless the caller holds one of `allowed` roles.
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), ApiError> {
        self.0.require_role(allowed).map_err(ApiError::from)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;
        let claims = state.keys.verify(token)?;

        Ok(Self(claims))
    }
}
