//! Inventario API Library
//!
//! Warehouse inventory module for the ERP backend: product catalog, stock
//! statistics, purchase intake from the purchasing module, warehouse slot
//! assignment and the materials-non-receipt reporting workflow.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub inventory_service: services::InventoryService,
    pub report_service: services::ReportService,
}

/// All module routes, mounted by the binary under `/api/inventory`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(handlers::inventory::routes())
        .merge(handlers::reports::routes())
}

/// Assembles the full application router. Shared by the binary and the
/// integration-test harness; transport-level layers (CORS, compression,
/// timeouts) are applied by the binary on top.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "inventario-api up" }))
        .route("/health", get(health_check))
        .route("/api/status", get(api_status))
        .nest("/api/inventory", api_routes())
        .merge(openapi::swagger_ui())
        .with_state(state)
}

async fn api_status() -> Result<Json<Value>, errors::ServiceError> {
    let version = env!("CARGO_PKG_VERSION");
    Ok(Json(json!({
        "success": true,
        "status": "ok",
        "version": version,
        "service": "inventario-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    })))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Ok(Json(json!({
        "success": true,
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
