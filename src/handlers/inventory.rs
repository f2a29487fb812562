use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    errors::ServiceError,
    handlers::common::validate_input,
    services::inventory::{
        AssignLocationInput, CreateProductInput, PurchaseIntakeInput, UpdateProductInput,
    },
    AppState,
};

/// Verification request: the acting user stamping the product.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyInput {
    #[serde(alias = "usuario")]
    #[validate(length(min = 1))]
    pub user: String,
}

/// Inventory router: catalog CRUD, statistics, purchase intake, reserved
/// backlog, slot assignment and verification.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list_products))
        .route("/stats", get(get_stats))
        .route("/show/:id", get(show_product))
        .route("/store", post(create_product))
        .route("/update/:id", put(update_product).patch(update_product))
        .route("/destroy/:id", delete(destroy_product))
        .route("/add-from-purchase", post(add_from_purchase))
        .route("/reserved-items", get(reserved_items))
        .route("/assign-location", post(assign_location))
        .route("/verify/:id", post(verify_product))
}

/// List all non-reserved products, newest first
#[utoipa::path(
    get,
    path = "/api/inventory/list",
    responses(
        (status = 200, description = "All non-reserved products, newest first"),
    ),
    tag = "inventory"
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.inventory_service.list_products().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "products": products,
            "total": products.len(),
        })),
    ))
}

/// Inventory statistics
#[utoipa::path(
    get,
    path = "/api/inventory/stats",
    responses(
        (status = 200, description = "Counts and total USD value over the whole catalog"),
    ),
    tag = "inventory"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.inventory_service.stats().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "stats": stats,
        })),
    ))
}

/// Product detail
#[utoipa::path(
    get,
    path = "/api/inventory/show/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail"),
        (status = 404, description = "Product not found"),
    ),
    tag = "inventory"
)]
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state
        .inventory_service
        .get_product(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "product": product,
        })),
    ))
}

/// Create a product from manual entry
#[utoipa::path(
    post,
    path = "/api/inventory/store",
    request_body = CreateProductInput,
    responses(
        (status = 200, description = "Product created"),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "inventory"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let product = state.inventory_service.create_product(payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Product created successfully",
            "data": product,
        })),
    ))
}

/// Partial product update
#[utoipa::path(
    put,
    path = "/api/inventory/update/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductInput,
    responses(
        (status = 200, description = "Product updated"),
        (status = 404, description = "Product not found"),
    ),
    tag = "inventory"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    state.inventory_service.update_product(id, payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Product updated successfully",
            "id": id,
        })),
    ))
}

/// Delete a product. Lenient: a missing id is still a success.
#[utoipa::path(
    delete,
    path = "/api/inventory/destroy/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted (or was already absent)"),
    ),
    tag = "inventory"
)]
pub async fn destroy_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.inventory_service.delete_product(id).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Product deleted successfully",
            "id": id,
        })),
    ))
}

/// Ingest paid purchase line items (called by the purchasing module)
#[utoipa::path(
    post,
    path = "/api/inventory/add-from-purchase",
    request_body = PurchaseIntakeInput,
    responses(
        (status = 200, description = "Items created as reserved stock"),
        (status = 400, description = "Empty item list"),
    ),
    tag = "inventory"
)]
pub async fn add_from_purchase(
    State(state): State<AppState>,
    Json(payload): Json<PurchaseIntakeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let items = state.inventory_service.add_purchased_items(payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": format!("{} items added to inventory", items.len()),
            "items": items,
        })),
    ))
}

/// Reserved products awaiting a warehouse slot
#[utoipa::path(
    get,
    path = "/api/inventory/reserved-items",
    responses(
        (status = 200, description = "Reserved products, newest first"),
    ),
    tag = "inventory"
)]
pub async fn reserved_items(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.inventory_service.reserved_items().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "reserved_items": items,
            "total": items.len(),
        })),
    ))
}

/// Assign a warehouse slot to a product
#[utoipa::path(
    post,
    path = "/api/inventory/assign-location",
    request_body = AssignLocationInput,
    responses(
        (status = 200, description = "Slot assigned"),
        (status = 400, description = "Out-of-range zone/level/position"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Slot already occupied by another product"),
    ),
    tag = "inventory"
)]
pub async fn assign_location(
    State(state): State<AppState>,
    Json(payload): Json<AssignLocationInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let location = state.inventory_service.assign_location(payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": format!("Location {} assigned successfully", location),
            "location": location,
        })),
    ))
}

/// Stamp a product as verified by the acting user
#[utoipa::path(
    post,
    path = "/api/inventory/verify/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = VerifyInput,
    responses(
        (status = 200, description = "Verification stamp set"),
        (status = 404, description = "Product not found"),
    ),
    tag = "inventory"
)]
pub async fn verify_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<VerifyInput>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;

    let product = state.inventory_service.verify_product(id, payload.user).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Product verified successfully",
            "data": {
                "verificado_at": product.verified_at,
                "verificado_por": product.verified_by,
            },
        })),
    ))
}
