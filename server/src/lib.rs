//! Composable Todo server assembly.
//!
//! The binary in `main.rs` reads [`Config`], opens the Postgres pool and
//! serves [`app`]. The pieces live here so they can be tested without a
//! process or a database.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;

use axum::Router;
use axum::http::{HeaderName, Method, header};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;

pub use config::{Config, ConfigError, DatabaseConfig, ServerConfig};

/// Header browsers may read from responses
const CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");

/// CORS policy for the browser UI.
///
/// Permissive when no origin is configured; otherwise only that origin may
/// call the RPC routes.
#[must_use]
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    match &server.cors_allow_origin {
        None => CorsLayer::permissive(),
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, CORRELATION_ID])
            .expose_headers([CORRELATION_ID]),
    }
}

/// The full HTTP application: RPC and health routes plus CORS.
#[must_use]
pub fn app(state: todo_web::AppState, server: &ServerConfig) -> Router {
    todo_web::router(state).layer(cors_layer(server))
}

/// Open the connection pool described by `database`.
///
/// # Errors
///
/// Returns the sqlx error if no connection can be established within the
/// configured timeout.
pub async fn connect_pool(database: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections)
        .acquire_timeout(database.connect_timeout)
        .connect(&database.url)
        .await
}
