//! # HTTP API Surface
//!
//! axum transport in front of the token lifecycle manager and the query
//! engine. Grant endpoints live under `/auth`, authenticated reads under
//! `/api`, plus a `/health` probe.

pub mod auth_routes;
pub mod config;
pub mod product_routes;
pub mod server;

use std::sync::Arc;

use crate::auth::TokenService;
use crate::query::QueryEngine;

pub use config::HttpServerConfig;
pub use server::HttpServer;

/// Shared application state: one store, one token service, constructed at
/// process start and passed into every handler.
pub struct AppState {
    pub token_service: TokenService,
    pub engine: QueryEngine,
}

impl AppState {
    pub fn new(token_service: TokenService, engine: QueryEngine) -> Arc<Self> {
        Arc::new(Self {
            token_service,
            engine,
        })
    }
}
