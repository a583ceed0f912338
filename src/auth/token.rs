//! # Access Token Management
//!
//! Signed, self-contained access tokens (JWT, HS256). Validity is determined
//! purely by signature and expiry - no server-side lookup.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};

/// Type tag carried by every client-credentials access token.
pub const TOKEN_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (client id)
    pub sub: String,

    /// Grant type tag
    #[serde(rename = "type")]
    pub token_type: String,

    /// Issued at (Unix epoch seconds)
    pub iat: i64,

    /// Expiration (Unix epoch seconds)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl AccessTokenClaims {
    /// Build claims at an explicit instant with an explicit identifier.
    ///
    /// Issuance is deterministic given `now` and `jti`; the public issue
    /// path supplies the current time and a fresh v4.
    pub fn at(subject: &str, ttl: Duration, now: DateTime<Utc>, jti: Uuid) -> Self {
        Self {
            sub: subject.to_string(),
            token_type: TOKEN_TYPE_CLIENT_CREDENTIALS.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: jti.to_string(),
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Access token lifetime
    pub access_token_ttl: Duration,

    /// Advertised refresh token lifetime (reported in grant responses;
    /// the refresh store itself only checks membership)
    pub refresh_token_ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
        }
    }
}

/// Mints and verifies signed access tokens
#[derive(Clone)]
pub struct AccessTokenManager {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AccessTokenManager {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign an access token for the given subject.
    pub fn issue(&self, subject: &str) -> AuthResult<String> {
        let claims = AccessTokenClaims::at(
            subject,
            self.config.access_token_ttl,
            Utc::now(),
            Uuid::new_v4(),
        );
        self.sign(&claims)
    }

    /// Sign pre-built claims (used by tests to pin time and jti).
    pub fn sign(&self, claims: &AccessTokenClaims) -> AuthResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Any structural or cryptographic failure maps to a typed error; this
    /// never panics past the boundary.
    pub fn verify(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }

    /// Access token lifetime in whole seconds (for `expires_in`).
    pub fn access_expires_in(&self) -> i64 {
        self.config.access_token_ttl.num_seconds()
    }

    /// Advertised refresh token lifetime in whole seconds.
    pub fn refresh_expires_in(&self) -> i64 {
        self.config.refresh_token_ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> AccessTokenManager {
        AccessTokenManager::new(TokenConfig {
            secret: "test_secret_key_for_testing_only".to_string(),
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
        })
    }

    #[test]
    fn test_issue_produces_jwt() {
        let manager = test_manager();
        let token = manager.issue("analytics_client").unwrap();

        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_round_trip() {
        let manager = test_manager();
        let token = manager.issue("analytics_client").unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, "analytics_client");
        assert_eq!(claims.token_type, TOKEN_TYPE_CLIENT_CREDENTIALS);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_payload_field_names() {
        // Wire shape is {sub, type, iat, exp, jti}
        let claims =
            AccessTokenClaims::at("c", Duration::minutes(1), Utc::now(), Uuid::new_v4());
        let json = serde_json::to_value(&claims).unwrap();
        let obj = json.as_object().unwrap();

        for key in ["sub", "type", "iat", "exp", "jti"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 5);
    }

    #[test]
    fn test_deterministic_given_time_and_jti() {
        let manager = test_manager();
        let now = Utc::now();
        let jti = Uuid::new_v4();

        let a = manager
            .sign(&AccessTokenClaims::at("c", Duration::minutes(5), now, jti))
            .unwrap();
        let b = manager
            .sign(&AccessTokenClaims::at("c", Duration::minutes(5), now, jti))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let manager = test_manager();
        assert!(matches!(
            manager.verify("not-a-jwt"),
            Err(AuthError::MalformedToken)
        ));
        assert!(matches!(
            manager.verify("invalid.token.here"),
            Err(AuthError::MalformedToken) | Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = test_manager();
        let other = AccessTokenManager::new(TokenConfig {
            secret: "a_different_secret".to_string(),
            ..TokenConfig::default()
        });

        let token = manager.issue("analytics_client").unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = test_manager();

        let past = Utc::now() - Duration::hours(2);
        let claims = AccessTokenClaims::at("c", Duration::hours(1), past, Uuid::new_v4());
        let token = manager.sign(&claims).unwrap();

        assert!(matches!(
            manager.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_expires_in_seconds() {
        let manager = test_manager();
        assert_eq!(manager.access_expires_in(), 30 * 60);
        assert_eq!(manager.refresh_expires_in(), 7 * 24 * 60 * 60);
    }
}
