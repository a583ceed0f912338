//! Product Query Routes
//!
//! Bearer-authenticated read endpoints over the query engine. Dataset
//! failures on the list endpoints are logged and degrade to empty results;
//! availability wins over completeness.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::auth::{AccessTokenClaims, AuthError};
use crate::query::{DatasetStats, Filter};
use crate::store::{DataSourceError, ProductRecord};

use super::auth_routes::{auth_error_response, ErrorResponse};
use super::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Product routes with shared state
pub fn product_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/products", get(products_handler))
        .route("/products/search", get(search_handler))
        .route("/brands", get(brands_handler))
        .route("/categories", get(categories_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

/// Extract and verify the bearer token from the Authorization header.
fn authorize(headers: &HeaderMap, state: &AppState) -> Result<AccessTokenClaims, ApiError> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| auth_error_response(AuthError::MalformedToken))?;

    state
        .token_service
        .verify_access_token(token)
        .map_err(auth_error_response)
}

/// Log a dataset failure and degrade to an empty record list.
fn degrade_records(err: DataSourceError) -> Vec<ProductRecord> {
    tracing::error!(error = %err, "query failed; returning empty result");
    Vec::new()
}

fn degrade_values(err: DataSourceError) -> Vec<String> {
    tracing::error!(error = %err, "query failed; returning empty result");
    Vec::new()
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub date: Option<String>,
    pub client_id: Option<i64>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Paginated listing in file order
async fn products_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    authorize(&headers, &state)?;

    let records = state
        .engine
        .page(params.limit.unwrap_or(100), params.offset.unwrap_or(0))
        .unwrap_or_else(degrade_records);
    Ok(Json(records))
}

/// Filtered search; raw predicate strings are sanitized before querying
async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductRecord>>, ApiError> {
    authorize(&headers, &state)?;

    let filter = Filter::from_raw(
        params.date,
        params.client_id,
        params.brand,
        params.sku,
        params.category,
        params.limit,
        params.offset,
    );

    let records = state
        .engine
        .search(&filter)
        .unwrap_or_else(degrade_records);
    Ok(Json(records))
}

async fn brands_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, ApiError> {
    authorize(&headers, &state)?;
    Ok(Json(state.engine.brands().unwrap_or_else(degrade_values)))
}

async fn categories_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, ApiError> {
    authorize(&headers, &state)?;
    Ok(Json(state.engine.categories().unwrap_or_else(degrade_values)))
}

async fn stats_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DatasetStats>, ApiError> {
    authorize(&headers, &state)?;

    let stats = state.engine.stats().unwrap_or_else(|e| {
        tracing::error!(error = %e, "stats failed; returning zeroes");
        DatasetStats {
            total_records: 0,
            brands_count: 0,
            categories_count: 0,
        }
    });
    Ok(Json(stats))
}
