use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{product, report};
use crate::handlers;
use crate::services::inventory::{
    AssignLocationInput, CreateProductInput, InventoryStats, PurchaseIntakeInput, PurchaseLineItem,
    UpdateProductInput,
};
use crate::services::reports::{CreateReportInput, UpdateReportInput};

/// OpenAPI document for the warehouse inventory module.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventario API",
        description = "Warehouse inventory module: product catalog, stock statistics, purchase intake, slot assignment and non-receipt reporting"
    ),
    paths(
        handlers::inventory::list_products,
        handlers::inventory::get_stats,
        handlers::inventory::show_product,
        handlers::inventory::create_product,
        handlers::inventory::update_product,
        handlers::inventory::destroy_product,
        handlers::inventory::add_from_purchase,
        handlers::inventory::reserved_items,
        handlers::inventory::assign_location,
        handlers::inventory::verify_product,
        handlers::reports::create_report,
        handlers::reports::list_reports,
        handlers::reports::update_report,
        handlers::reports::delete_report,
    ),
    components(schemas(
        product::Model,
        product::Currency,
        product::ProductStatus,
        product::LocationStatus,
        report::Model,
        report::ReportStatus,
        CreateProductInput,
        UpdateProductInput,
        PurchaseIntakeInput,
        PurchaseLineItem,
        AssignLocationInput,
        CreateReportInput,
        UpdateReportInput,
        InventoryStats,
        handlers::inventory::VerifyInput,
    )),
    tags(
        (name = "inventory", description = "Product catalog, statistics, intake and slot management"),
        (name = "reports", description = "Materials-non-receipt reports"),
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the document at
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
