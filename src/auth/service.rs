//! # Token Lifecycle Service
//!
//! Orchestrates the client-credentials and refresh-token grants: credential
//! verification, access token issuance, refresh rotation, and revocation.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};
use super::refresh::RefreshTokenStore;
use super::token::{AccessTokenClaims, AccessTokenManager, TokenConfig};

/// Grant type string for the client-credentials flow.
pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Grant type string for the refresh flow.
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";

/// The single registered static client.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Client-credentials grant request
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Refresh grant request.
///
/// `client_id` names the subject of the minted access token; possession of
/// the refresh token is what authorizes the grant.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub grant_type: String,
    pub refresh_token: String,
    pub client_id: String,
}

/// Grant response shared by both flows
#[derive(Debug, Clone, Serialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub refresh_expires_in: i64,
}

/// Token lifecycle manager: one per process, shared across handlers.
pub struct TokenService {
    credentials: ClientCredentials,
    tokens: AccessTokenManager,
    refresh_store: RefreshTokenStore,
}

impl TokenService {
    pub fn new(credentials: ClientCredentials, token_config: TokenConfig) -> Self {
        Self {
            credentials,
            tokens: AccessTokenManager::new(token_config),
            refresh_store: RefreshTokenStore::new(),
        }
    }

    /// Exact match against the configured static client, constant-time on
    /// both halves.
    pub fn verify_credentials(&self, client_id: &str, client_secret: &str) -> bool {
        let id_ok: bool = client_id
            .as_bytes()
            .ct_eq(self.credentials.client_id.as_bytes())
            .into();
        let secret_ok: bool = client_secret
            .as_bytes()
            .ct_eq(self.credentials.client_secret.as_bytes())
            .into();
        id_ok & secret_ok
    }

    /// Mint a signed access token for the subject.
    pub fn issue_access_token(&self, subject: &str) -> AuthResult<String> {
        self.tokens.issue(subject)
    }

    /// Signature + expiry check; any failure is a typed rejection.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        self.tokens.verify(token)
    }

    /// Mint an opaque refresh token and register it as valid.
    pub fn issue_refresh_token(&self) -> String {
        self.refresh_store.issue()
    }

    /// Verify-and-mint: reject an unknown token, otherwise mint a new access
    /// token for the supplied client id.
    ///
    /// The presented refresh token stays valid across this step; the grant
    /// flow revokes it and issues the replacement afterwards, so the token
    /// is gone before the response is returned.
    pub fn consume_refresh_token(&self, token: &str, client_id: &str) -> AuthResult<String> {
        if !self.refresh_store.is_valid(token) {
            return Err(AuthError::InvalidGrant);
        }
        self.issue_access_token(client_id)
    }

    /// Remove a refresh token from the valid set. Idempotent.
    pub fn revoke_refresh_token(&self, token: &str) -> bool {
        self.refresh_store.revoke(token)
    }

    /// Full client-credentials grant.
    pub fn token_grant(&self, request: &TokenRequest) -> AuthResult<TokenGrant> {
        if request.grant_type != GRANT_CLIENT_CREDENTIALS {
            return Err(AuthError::UnsupportedGrantType(request.grant_type.clone()));
        }
        if !self.verify_credentials(&request.client_id, &request.client_secret) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.issue_access_token(&request.client_id)?;
        let refresh_token = self.issue_refresh_token();

        Ok(self.grant(access_token, refresh_token))
    }

    /// Full refresh grant with rotation: mint first, then swap the old
    /// refresh token for a fresh one.
    pub fn refresh_grant(&self, request: &RefreshRequest) -> AuthResult<TokenGrant> {
        if request.grant_type != GRANT_REFRESH_TOKEN {
            return Err(AuthError::UnsupportedGrantType(request.grant_type.clone()));
        }

        let access_token = self.consume_refresh_token(&request.refresh_token, &request.client_id)?;

        // Rotate: the presented token is single-use
        self.revoke_refresh_token(&request.refresh_token);
        let refresh_token = self.issue_refresh_token();

        Ok(self.grant(access_token, refresh_token))
    }

    fn grant(&self, access_token: String, refresh_token: String) -> TokenGrant {
        TokenGrant {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.tokens.access_expires_in(),
            refresh_token,
            refresh_expires_in: self.tokens.refresh_expires_in(),
        }
    }
}
