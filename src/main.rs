//! storepulse entry point
//!
//! Wires the single store, query engine, and token service together at
//! process start and hands them to the HTTP server. No subsystem holds
//! global state; everything is constructed here once.

use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::EnvFilter;

use storepulse::auth::{ClientCredentials, TokenConfig, TokenService};
use storepulse::config::AppConfig;
use storepulse::http_server::{AppState, HttpServer};
use storepulse::query::QueryEngine;
use storepulse::store::TabularStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let store = Arc::new(TabularStore::new(&config.csv_path));
    let engine = QueryEngine::new(store);

    let token_service = TokenService::new(
        ClientCredentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        },
        TokenConfig {
            secret: config.jwt_secret.clone(),
            access_token_ttl: Duration::minutes(config.access_token_minutes),
            refresh_token_ttl: Duration::days(config.refresh_token_days),
        },
    );

    let state = AppState::new(token_service, engine);
    let server = HttpServer::with_config(config.http.clone(), state);

    if let Err(e) = server.start().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
