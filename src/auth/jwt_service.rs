use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::InvalidToken,
        }
    }
}

/// Claims carried by an admin access token. The token is the sole source of
/// truth for authenticated-admin state; nothing else is stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and validates stateless HS256 admin tokens.
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expires_in: Duration,
    algorithm: Algorithm,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expires_in: Duration::hours(config.jwt_expires_in_hours),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn issue(&self, admin_id: Uuid, username: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            username: username.to_string(),
            exp: (now + self.expires_in).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        let token = encode(&Header::new(self.algorithm), &claims, &encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))?;

        info!(admin_id = %admin_id, username = %username, "Admin token issued");

        Ok(token)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::new(self.algorithm);
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service(expires_in_hours: i64) -> JwtService {
        JwtService::new(&AuthConfig {
            jwt_secret: "test_secret_key_for_testing".to_string(),
            jwt_expires_in_hours: expires_in_hours,
            admin_username: None,
            admin_password: None,
        })
    }

    #[test]
    fn test_issue_validate_round_trip() {
        let service = test_service(24);
        let admin_id = Uuid::new_v4();

        let token = service.issue(admin_id, "admin").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, admin_id.to_string());
        assert_eq!(claims.username, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = test_service(-1);
        let token = service.issue(Uuid::new_v4(), "admin").unwrap();

        match service.validate(&token) {
            Err(JwtError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|c| c.username)),
        }
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service(24);
        let token = service.issue(Uuid::new_v4(), "admin").unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(matches!(service.validate(&tampered), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = test_service(24);
        let verifier = JwtService::new(&AuthConfig {
            jwt_secret: "a_different_secret".to_string(),
            jwt_expires_in_hours: 24,
            admin_username: None,
            admin_password: None,
        });

        let token = issuer.issue(Uuid::new_v4(), "admin").unwrap();
        assert!(matches!(verifier.validate(&token), Err(JwtError::InvalidToken)));
    }
}
