use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use inventario_api::{
    build_app,
    config::AppConfig,
    db,
    events::{self, EventSender},
    services::{InventoryService, ReportService},
    AppState,
};

/// Helper harness for spinning up an application backed by an in-memory
/// SQLite database. Each test gets its own fresh schema.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single pooled connection keeps the in-memory database alive for
        // the whole test.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let inventory_service = InventoryService::new(
            db_arc.clone(),
            event_sender.clone(),
            cfg.usd_exchange_rate_decimal(),
        );
        let report_service = ReportService::new(db_arc.clone(), event_sender.clone());

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            inventory_service,
            report_service,
        };

        let router = build_app(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Issue a request against the in-process router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json).expect("serialize request body"),
                )),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }
}

/// Decode a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
