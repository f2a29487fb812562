mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn product_crud_lifecycle() {
    let app = TestApp::new().await;

    // Create with the legacy Spanish payload keys
    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({
                "nombre": "Cement bag 42.5kg",
                "sku": "MAT-001",
                "cantidad": 10,
                "precio": 25.5,
                "moneda": "PEN"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let product = body["data"].clone();
    let id = product["id"].as_i64().expect("product id");

    // Documented defaults
    assert_eq!(product["category"], "Other");
    assert_eq!(product["unit"], "UND");
    assert_eq!(product["status"], "active");
    assert_eq!(product["reserved"], false);
    assert!(product["location"].is_null());
    assert!(product["location_status"].is_null());

    // Detail
    let response = app
        .request(Method::GET, &format!("/api/inventory/show/{id}"), None)
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["product"]["sku"], "MAT-001");
    assert_eq!(body["product"]["quantity"], 10);

    // Listing
    let response = app.request(Method::GET, "/api/inventory/list", None).await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["products"][0]["id"], id);

    // Partial update leaves unspecified fields unchanged
    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/update/{id}"),
            Some(json!({"cantidad": 4, "estado": "pending"})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["id"], id);

    let response = app
        .request(Method::GET, &format!("/api/inventory/show/{id}"), None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["product"]["quantity"], 4);
    assert_eq!(body["product"]["status"], "pending");
    assert_eq!(body["product"]["name"], "Cement bag 42.5kg");

    // Delete, then the detail lookup misses
    let response = app
        .request(Method::DELETE, &format!("/api/inventory/destroy/{id}"), None)
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(Method::GET, &format!("/api/inventory/show/{id}"), None)
        .await;
    assert_eq!(response.status(), 404);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn create_with_location_marks_it_assigned() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({
                "nombre": "Rebar 3/8",
                "sku": "MAT-LOC",
                "cantidad": 50,
                "ubicacion": "C-2-5"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["location"], "C-2-5");
    assert_eq!(body["data"]["location_status"], "assigned");
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let app = TestApp::new().await;

    // No name or quantity
    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({"sku": "MAT-002"})),
        )
        .await;
    assert!(response.status().is_client_error());

    let response = app.request(Method::GET, "/api/inventory/list", None).await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn create_rejects_duplicate_sku() {
    let app = TestApp::new().await;

    let payload = json!({"nombre": "Wire roll", "sku": "MAT-DUP", "cantidad": 1});
    let response = app
        .request(Method::POST, "/api/inventory/store", Some(payload.clone()))
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(Method::POST, "/api/inventory/store", Some(payload))
        .await;
    assert_eq!(response.status(), 400);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn delete_nonexistent_product_still_succeeds() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::DELETE, "/api/inventory/destroy/9999", None)
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn stats_convert_total_value_to_usd() {
    let app = TestApp::new().await;

    // One USD product (10 x 2) and one PEN product (37.5 x 1 at rate 3.75)
    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({
                "nombre": "Imported valve",
                "sku": "USD-1",
                "cantidad": 2,
                "precio": 10,
                "moneda": "USD"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({
                "nombre": "Local pipe",
                "sku": "PEN-1",
                "cantidad": 1,
                "precio": 37.5,
                "moneda": "PEN"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app.request(Method::GET, "/api/inventory/stats", None).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let stats = body["stats"].clone();
    assert_eq!(stats["total_products"], 2);
    assert_eq!(stats["active_products"], 2);
    assert_eq!(stats["total_value_usd"], 30.0);
    // Both quantities are at or below the low-stock threshold of 5
    assert_eq!(stats["stock_alert"], 2);
}

#[tokio::test]
async fn stats_on_empty_inventory() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/inventory/stats", None).await;
    let body = response_json(response).await;
    assert_eq!(body["stats"]["total_products"], 0);
    assert_eq!(body["stats"]["active_products"], 0);
    assert_eq!(body["stats"]["total_value_usd"], 0.0);
    assert_eq!(body["stats"]["stock_alert"], 0);
}

#[tokio::test]
async fn verify_stamps_acting_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({"nombre": "Angle bar", "sku": "MAT-VER", "cantidad": 3})),
        )
        .await;
    let body = response_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            &format!("/api/inventory/verify/{id}"),
            Some(json!({"usuario": "jperez"})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["data"]["verificado_por"], "jperez");
    assert!(!body["data"]["verificado_at"].is_null());

    // Re-verification overwrites the stamp
    let response = app
        .request(
            Method::POST,
            &format!("/api/inventory/verify/{id}"),
            Some(json!({"usuario": "mlopez"})),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["data"]["verificado_por"], "mlopez");
}

#[tokio::test]
async fn verify_unknown_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/verify/777",
            Some(json!({"usuario": "jperez"})),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn health_endpoint_reports_database() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["checks"]["database"], "healthy");
}
