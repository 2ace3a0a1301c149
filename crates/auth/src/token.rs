//! HS256 bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lifecycle::UserRole;

use crate::AuthError;

/// Development fallback used when `JWT_SECRET` is not configured.
const DEV_SECRET: &str = "secretKey";

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Fail unless the claims carry one of `allowed` roles.
    pub fn require_role(&self, allowed: &[UserRole]) -> Result<(), AuthError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(self.role.to_string()))
        }
    }
}

/// Signing and verification keys derived from the shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Build keys from `JWT_SECRET`, falling back to the development secret.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string());
        Self::new(&secret)
    }

    /// Issue a token for the given user.
    pub fn sign(
        &self,
        user_id: Uuid,
        email: Option<String>,
        phone: Option<String>,
        role: UserRole,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email,
            phone,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return its claims.  Expired or tampered tokens
    /// are rejected.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let keys = TokenKeys::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = keys
            .sign(
                user_id,
                Some("admin@civic.com".into()),
                None,
                UserRole::Admin,
            )
            .unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email.as_deref(), Some("admin@civic.com"));
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenKeys::new("secret-a")
            .sign(Uuid::new_v4(), None, None, UserRole::Citizen)
            .unwrap();
        assert!(TokenKeys::new("secret-b").verify(&token).is_err());
    }

    #[test]
    fn role_check_enforces_membership() {
        let keys = TokenKeys::new("test-secret");
        let token = keys
            .sign(Uuid::new_v4(), None, None, UserRole::Citizen)
            .unwrap();
        let claims = keys.verify(&token).unwrap();

        assert!(claims.require_role(&[UserRole::Citizen]).is_ok());
        assert!(matches!(
            claims.require_role(&[UserRole::Admin]),
            Err(AuthError::Forbidden(role)) if role == "CITIZEN"
        ));
    }
}
