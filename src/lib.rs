//! storepulse - authenticated query service over in-memory product analytics data
//!
//! Two cores: a token lifecycle manager (OAuth2-style client credentials with
//! rotating refresh tokens) and a read-only query engine over a load-once
//! tabular store. Everything is in-process; the dataset is immutable after
//! the first load.

pub mod auth;
pub mod config;
pub mod http_server;
pub mod query;
pub mod store;
