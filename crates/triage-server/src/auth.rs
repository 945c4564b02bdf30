//! Authentication: JWT token management and the staff extractor.
//!
//! Tokens are HS256-signed with the secret from `JWT_SECRET` and carry
//! the staff username as subject. Password hashing lives in
//! `triage_store::users` so the CLI shares it.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Staff username (subject).
    pub sub: String,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

/// Staff member authenticated via Bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedStaff {
    pub username: String,
}

/// Create a JWT token for a staff member.
pub fn create_token(
    username: &str,
    secret: &str,
    expire_minutes: u64,
) -> Result<String, ApiError> {
    let now = chrono::Utc::now();
    let exp = (now + chrono::Duration::minutes(expire_minutes as i64)).timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        exp,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
}

/// Validate a JWT token and return claims.
///
/// Expired or tampered tokens both map to a generic unauthorized
/// message; no detail beyond that is leaked.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    Ok(token_data.claims)
}

impl FromRequestParts<AppState> for AuthenticatedStaff {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be Bearer <token>".to_string())
        })?;

        let claims = validate_token(token, &state.config().jwt_secret)?;

        Ok(AuthenticatedStaff {
            username: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_validate_token() {
        let token = create_token("inspector", "test-secret", 120).unwrap();
        let claims = validate_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "inspector");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let token = create_token("inspector", "secret1", 120).unwrap();
        assert!(validate_token(&token, "secret2").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Expiry in the past; validation's default leeway is 60s, so
        // back-date well beyond it.
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: "inspector".to_string(),
            exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
            iat: (now - chrono::Duration::hours(3)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(validate_token(&token, "test-secret").is_err());
    }
}
