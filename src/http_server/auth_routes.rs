//! Auth HTTP Routes
//!
//! OAuth2-style grant endpoints: client-credentials token issuance, refresh
//! rotation, and explicit revocation.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::errors::AuthError;
use crate::auth::service::{RefreshRequest, TokenRequest};

use super::AppState;

/// OAuth2 error body: `{error, error_description}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_description: String,
}

impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        Self {
            error: err.oauth_code().to_string(),
            error_description: err.to_string(),
        }
    }
}

/// Map an auth error to its HTTP response.
pub fn auth_error_response(err: AuthError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(&err)))
}

#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    pub revoked: bool,
}

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/token", post(token_handler))
        .route("/refresh", post(refresh_handler))
        .route("/revoke", post(revoke_handler))
        .with_state(state)
}

/// Client-credentials grant handler
async fn token_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<crate::auth::TokenGrant>, (StatusCode, Json<ErrorResponse>)> {
    match state.token_service.token_grant(&request) {
        Ok(grant) => Ok(Json(grant)),
        Err(e) => {
            tracing::warn!(client_id = %request.client_id, error = %e, "token grant rejected");
            Err(auth_error_response(e))
        }
    }
}

/// Refresh grant handler (rotates the presented refresh token)
async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<crate::auth::TokenGrant>, (StatusCode, Json<ErrorResponse>)> {
    match state.token_service.refresh_grant(&request) {
        Ok(grant) => Ok(Json(grant)),
        Err(e) => {
            tracing::warn!(client_id = %request.client_id, error = %e, "refresh grant rejected");
            Err(auth_error_response(e))
        }
    }
}

/// Revocation handler; revoking an unknown token is a no-op, not an error
async fn revoke_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RevokeRequest>,
) -> Json<RevokeResponse> {
    let revoked = state.token_service.revoke_refresh_token(&request.refresh_token);
    Json(RevokeResponse { revoked })
}
