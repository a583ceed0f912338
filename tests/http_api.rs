//! End-to-end checks of the HTTP surface: grant endpoints, bearer-guarded
//! reads, and the health probe.

use std::io::Write;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use storepulse::auth::{ClientCredentials, TokenConfig, TokenService};
use storepulse::http_server::{AppState, HttpServer, HttpServerConfig};
use storepulse::query::QueryEngine;
use storepulse::store::TabularStore;

const FIXTURE: &str = "\
id_tie_fecha_valor,id_cli_cliente,desc_ga_sku_producto,desc_ga_marca_producto,desc_categoria_prod_principal
20240129,8,K1010148001,STANLEY,CAMPING
20240129,8,SUCEI01,CASABLANCA,PINTURAS
20240130,10,DWA2NGFT40IR,DEWALT,HERRAMIENTAS
";

fn test_app() -> (Router, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();

    let store = Arc::new(TabularStore::new(file.path()));
    let engine = QueryEngine::new(store);
    let token_service = TokenService::new(
        ClientCredentials {
            client_id: "analytics_client".to_string(),
            client_secret: "analytics_secret".to_string(),
        },
        TokenConfig {
            secret: "http_test_secret".to_string(),
            access_token_ttl: Duration::minutes(30),
            refresh_token_ttl: Duration::days(7),
        },
    );

    let state = AppState::new(token_service, engine);
    let router = HttpServer::with_config(HttpServerConfig::default(), state).router();
    (router, file)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn obtain_token(router: &Router) -> (String, String) {
    let response = router
        .clone()
        .oneshot(post_json(
            "/auth/token",
            json!({
                "grant_type": "client_credentials",
                "client_id": "analytics_client",
                "client_secret": "analytics_secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn health_is_open() {
    let (router, _file) = test_app();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn token_grant_shape() {
    let (router, _file) = test_app();

    let response = router
        .oneshot(post_json(
            "/auth/token",
            json!({
                "grant_type": "client_credentials",
                "client_id": "analytics_client",
                "client_secret": "analytics_secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 1800);
    assert_eq!(body["refresh_expires_in"], 7 * 24 * 60 * 60);
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn bad_credentials_are_invalid_client() {
    let (router, _file) = test_app();

    let response = router
        .oneshot(post_json(
            "/auth/token",
            json!({
                "grant_type": "client_credentials",
                "client_id": "analytics_client",
                "client_secret": "wrong",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_client");
}

#[tokio::test]
async fn wrong_grant_type_is_bad_request() {
    let (router, _file) = test_app();

    let response = router
        .oneshot(post_json(
            "/auth/token",
            json!({
                "grant_type": "password",
                "client_id": "analytics_client",
                "client_secret": "analytics_secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "unsupported_grant_type");
}

#[tokio::test]
async fn refresh_rotates_and_rejects_replay() {
    let (router, _file) = test_app();
    let (_, refresh_token) = obtain_token(&router).await;

    let refresh_body = json!({
        "grant_type": "refresh_token",
        "refresh_token": refresh_token,
        "client_id": "analytics_client",
    });

    let response = router
        .clone()
        .oneshot(post_json("/auth/refresh", refresh_body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_ne!(body["refresh_token"], refresh_token.as_str());

    // Replay the consumed token
    let replay = router
        .oneshot(post_json("/auth/refresh", refresh_body))
        .await
        .unwrap();
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(replay).await;
    assert_eq!(body["error"], "invalid_grant");
}

#[tokio::test]
async fn revoke_endpoint_is_idempotent() {
    let (router, _file) = test_app();
    let (_, refresh_token) = obtain_token(&router).await;

    let body = json!({"refresh_token": refresh_token});

    let first = router
        .clone()
        .oneshot(post_json("/auth/revoke", body.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["revoked"], true);

    let second = router
        .oneshot(post_json("/auth/revoke", body))
        .await
        .unwrap();
    assert_eq!(body_json(second).await["revoked"], false);
}

#[tokio::test]
async fn products_require_bearer_token() {
    let (router, _file) = test_app();

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/api/products").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let garbage = router
        .oneshot(get_with_bearer("/api/products", "not.a.token"))
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authorized_product_listing() {
    let (router, _file) = test_app();
    let (access_token, _) = obtain_token(&router).await;

    let response = router
        .clone()
        .oneshot(get_with_bearer("/api/products?limit=2", &access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["desc_ga_marca_producto"], "STANLEY");
}

#[tokio::test]
async fn authorized_search_and_stats() {
    let (router, _file) = test_app();
    let (access_token, _) = obtain_token(&router).await;

    let response = router
        .clone()
        .oneshot(get_with_bearer(
            "/api/products/search?brand=stanley",
            &access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let hits = body_json(response).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["desc_ga_sku_producto"], "K1010148001");

    let response = router
        .clone()
        .oneshot(get_with_bearer("/api/stats", &access_token))
        .await
        .unwrap();
    let stats = body_json(response).await;
    assert_eq!(stats["total_records"], 3);
    assert_eq!(stats["brands_count"], 3);
    assert_eq!(stats["categories_count"], 3);

    let response = router
        .oneshot(get_with_bearer("/api/brands", &access_token))
        .await
        .unwrap();
    let brands = body_json(response).await;
    assert_eq!(brands, json!(["CASABLANCA", "DEWALT", "STANLEY"]));
}

#[tokio::test]
async fn missing_dataset_degrades_to_empty_list() {
    // Store points at a file that does not exist: reads log the failure and
    // return an empty page instead of a 500.
    let store = Arc::new(TabularStore::new("/nonexistent/products.csv"));
    let engine = QueryEngine::new(store);
    let token_service = TokenService::new(
        ClientCredentials {
            client_id: "analytics_client".to_string(),
            client_secret: "analytics_secret".to_string(),
        },
        TokenConfig {
            secret: "http_test_secret".to_string(),
            ..TokenConfig::default()
        },
    );
    let state = AppState::new(token_service, engine);
    let router = HttpServer::with_config(HttpServerConfig::default(), state).router();

    let (access_token, _) = obtain_token(&router).await;
    let response = router
        .oneshot(get_with_bearer("/api/products", &access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
