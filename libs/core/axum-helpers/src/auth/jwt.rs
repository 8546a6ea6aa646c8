use super::config::JwtConfig;
use crate::errors::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the user's email
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Stateless HS256 token issuer
#[derive(Clone)]
pub struct JwtIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.ttl_secs, "JWT issuer initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign a token for `subject` that expires after the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AppError> {
        decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> JwtIssuer {
        JwtIssuer::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let token = issuer.issue("a@x.com").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = JwtIssuer::new(&JwtConfig::new("ffffffffffffffffffffffffffffffff").unwrap());
        let token = other.issue("a@x.com").unwrap();

        assert!(matches!(
            issuer().verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let config = JwtConfig::new("0123456789abcdef0123456789abcdef")
            .unwrap()
            .with_ttl_secs(-3600);
        let issuer = JwtIssuer::new(&config);
        let token = issuer.issue("a@x.com").unwrap();

        assert!(issuer.verify(&token).is_err());
    }
}
