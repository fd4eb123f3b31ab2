//! Login tokens: HS256 JWTs carrying the staff number and role.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::user::Role;

/// JWT claims issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Staff number, as a string per RFC 7519
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from `JWT_SECRET`.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a token for `user_id` valid from now for the configured TTL.
    pub fn issue(&self, user_id: i32, role: Role) -> Result<String, AppError> {
        self.issue_at(user_id, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: i32,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: now.timestamp().saturating_add(self.ttl_seconds),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry. Any failure is `InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn issued_token_verifies() {
        let keys = TokenKeys::new(b"test-secret", 3600);
        let token = keys.issue(25292, Role::Finance).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "25292");
        assert_eq!(claims.role, Role::Finance);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_from_other_secret_rejected() {
        let token = TokenKeys::new(b"one", 3600)
            .issue(25291, Role::Registrar)
            .unwrap();
        let result = TokenKeys::new(b"two", 3600).verify(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_rejected() {
        let keys = TokenKeys::new(b"test-secret", 3600);
        let issued = Utc::now() - Duration::hours(2);
        let token = keys.issue_at(25293, Role::Director, issued).unwrap();
        assert!(matches!(keys.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_rejected() {
        let keys = TokenKeys::new(b"test-secret", 3600);
        let token = keys.issue(25291, Role::Registrar).unwrap();
        let other = keys.issue(25293, Role::Director).unwrap();

        // header and signature of one token around the payload of another
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(keys.verify(&forged).is_err());
    }

    #[test]
    fn huge_ttl_saturates_instead_of_overflowing() {
        let keys = TokenKeys::new(b"test-secret", i64::MAX);
        let token = keys.issue(25292, Role::Finance).unwrap();
        assert_eq!(keys.verify(&token).unwrap().exp, i64::MAX);
    }
}
