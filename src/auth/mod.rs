//! # Token Lifecycle Manager
//!
//! Client-credentials authentication with signed access tokens and rotating
//! opaque refresh tokens.
//!
//! ## Invariants
//! - Access token validation is stateless (signature + expiry only)
//! - Refresh tokens are single-use: consumed on refresh, replaced by a new one
//! - A consumed or revoked refresh token is never accepted again

pub mod errors;
pub mod refresh;
pub mod service;
pub mod token;

pub use errors::{AuthError, AuthResult};
pub use refresh::RefreshTokenStore;
pub use service::{ClientCredentials, RefreshRequest, TokenGrant, TokenRequest, TokenService};
pub use token::{AccessTokenClaims, AccessTokenManager, TokenConfig};
