use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    error::DomainError,
    models::user::{User, UserId},
    services::token_service::{Token, TokenService},
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,      // Subject (user ID)
    username: String, // Login name
    role: String,     // Role at issue time
    exp: i64,         // Expiration time
    iat: i64,         // Issued at
}

#[derive(Clone)]
pub struct JwtTokenService {
    secret: String,
    expiration_hours: i64,
}

impl JwtTokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: 24, // 24h
        }
    }

    pub fn with_expiration(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate(&self, user: &User) -> Result<Token, DomainError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            role: user.role().as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::TokenIssue(e.to_string()))
    }

    fn authenticate(&self, token: &str) -> Result<UserId, DomainError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            debug!(error = %e, "rejected bearer token");
            DomainError::InvalidToken
        })?;

        UserId::parse(&data.claims.sub).map_err(|_| DomainError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{credential::HashedPassword, user::UserRole};

    fn user() -> User {
        User::new(
            UserId::new(),
            "clerk01".to_string(),
            HashedPassword::new("hash".to_string()),
            UserRole::Clerk,
        )
        .unwrap()
    }

    #[test]
    fn test_token_resolves_to_user() {
        let service = JwtTokenService::new("test-secret".to_string());
        let user = user();

        let token = service.generate(&user).unwrap();
        assert_eq!(service.authenticate(&token).unwrap(), *user.id());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = JwtTokenService::new("secret-a".to_string());
        let verifier = JwtTokenService::new("secret-b".to_string());

        let token = issuer.generate(&user()).unwrap();
        assert!(matches!(
            verifier.authenticate(&token),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = JwtTokenService::with_expiration("test-secret".to_string(), -2);
        let token = service.generate(&user()).unwrap();
        assert!(matches!(
            service.authenticate(&token),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = JwtTokenService::new("test-secret".to_string());
        assert!(service.authenticate("not.a.token").is_err());
    }
}
