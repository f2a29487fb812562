use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::json;

use crate::{
    errors::ServiceError,
    handlers::common::validate_input,
    services::reports::{CreateReportInput, UpdateReportInput},
    AppState,
};

/// Report router: materials-non-receipt reports with a forward-only
/// three-state lifecycle.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reportes", get(list_reports).post(create_report))
        .route(
            "/reportes/:id",
            axum::routing::put(update_report).delete(delete_report),
        )
}

/// Create a report against an existing product
#[utoipa::path(
    post,
    path = "/api/inventory/reportes",
    request_body = CreateReportInput,
    responses(
        (status = 200, description = "Report created with product snapshot"),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Referenced product not found"),
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateReportInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let report = state.report_service.create_report(payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Report created successfully",
            "data": report,
        })),
    ))
}

/// List all reports, newest first
#[utoipa::path(
    get,
    path = "/api/inventory/reportes",
    responses(
        (status = 200, description = "All reports, newest first"),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let reports = state.report_service.list_reports().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "reportes": reports,
            "total": reports.len(),
        })),
    ))
}

/// Update a report's status, notes or resolution
#[utoipa::path(
    put,
    path = "/api/inventory/reportes/{id}",
    params(("id" = i64, Path, description = "Report id")),
    request_body = UpdateReportInput,
    responses(
        (status = 200, description = "Report updated"),
        (status = 400, description = "Backward status transition"),
        (status = 404, description = "Report not found"),
    ),
    tag = "reports"
)]
pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReportInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let report = state.report_service.update_report(id, payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Report updated successfully",
            "data": report,
        })),
    ))
}

/// Delete a report. Strict: a missing id is an error.
#[utoipa::path(
    delete,
    path = "/api/inventory/reportes/{id}",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found"),
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.report_service.delete_report(id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Report deleted successfully",
        })),
    ))
}
