//! JWT Token Service
//!
//! Issues HS256 access tokens asserting a username. Verification belongs to
//! whoever receives the token; `decode_claims` is provided for those
//! consumers and for tests.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT Claims structure containing user information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username the token asserts
    pub sub: String,
    /// Same as `sub`; kept for consumers that read the username claim
    pub username: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with the provided secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key,
            decoding_key,
            validation,
            ttl,
        }
    }

    /// Sign a token for `subject`, expiring one TTL from now
    pub fn issue(&self, subject: &str) -> Result<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// Sign a token as if issued at `now`
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: subject.to_string(),
            username: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode JWT token")?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate JWT token")
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        Ok(self.validate_token(token)?.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret", Duration::hours(1))
    }

    #[test]
    fn test_jwt_roundtrip() {
        let jwt_service = service();

        let issued = jwt_service.issue("alice").unwrap();
        let claims = jwt_service.decode_claims(&issued.token).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn expiry_is_one_hour_after_issuance() {
        let now = Utc::now();
        let issued = service().issue_at("alice", now).unwrap();
        let claims = service().decode_claims(&issued.token).unwrap();

        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let two_hours_ago = Utc::now() - Duration::hours(2);
        let issued = service().issue_at("alice", two_hours_ago).unwrap();

        assert!(service().decode_claims(&issued.token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtService::new("other_secret", Duration::hours(1));
        let issued = other.issue("alice").unwrap();

        assert!(service().decode_claims(&issued.token).is_err());
    }
}
