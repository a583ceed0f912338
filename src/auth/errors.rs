//! # Auth Errors
//!
//! Error types for the token lifecycle manager, with HTTP status codes and
//! OAuth2 error code strings for the transport layer.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and token lifecycle errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Client id/secret pair does not match the configured client
    /// (generic - don't leak which half was wrong)
    #[error("Invalid client credentials")]
    InvalidCredentials,

    /// Refresh token is unknown, already consumed, or revoked
    #[error("Invalid or expired refresh token")]
    InvalidGrant,

    /// Caller asked for a grant type this endpoint does not support
    #[error("Unsupported grant type: {0}")]
    UnsupportedGrantType(String),

    /// Access token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Access token signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Access token is structurally invalid
    #[error("Malformed token")]
    MalformedToken,

    /// Signing failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::UnsupportedGrantType(_) => 400,

            AuthError::InvalidCredentials => 401,
            AuthError::InvalidGrant => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::MalformedToken => 401,

            AuthError::TokenGenerationFailed => 500,
        }
    }

    /// OAuth2 error code string (RFC 6749 §5.2)
    pub fn oauth_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_client",
            AuthError::InvalidGrant => "invalid_grant",
            AuthError::UnsupportedGrantType(_) => "unsupported_grant_type",
            AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::MalformedToken => "invalid_token",
            AuthError::TokenGenerationFailed => "server_error",
        }
    }
}
