mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

async fn create_product(app: &TestApp, sku: &str) -> i64 {
    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({"nombre": format!("Item {sku}"), "sku": sku, "cantidad": 1})),
        )
        .await;
    assert_eq!(response.status(), 200);
    response_json(response).await["data"]["id"]
        .as_i64()
        .expect("product id")
}

#[tokio::test]
async fn assigning_a_slot_places_reserved_stock() {
    let app = TestApp::new().await;

    // Intake one purchased item
    let response = app
        .request(
            Method::POST,
            "/api/inventory/add-from-purchase",
            Some(json!({
                "batch_id": "BATCH-LOC",
                "items": [{"description": "Anchor bolts", "qty": 100, "subtotal": 55}]
            })),
        )
        .await;
    let body = response_json(response).await;
    let id = body["items"][0]["id"].as_i64().expect("intake product id");

    // Assign with the legacy Spanish keys
    let response = app
        .request(
            Method::POST,
            "/api/inventory/assign-location",
            Some(json!({"product_id": id, "zona": "A", "nivel": 1, "posicion": 1})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["location"], "A-1-1");

    // The item now holds a slot: out of the reserved backlog, into the catalog
    let response = app
        .request(Method::GET, "/api/inventory/reserved-items", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 0);

    let response = app
        .request(Method::GET, &format!("/api/inventory/show/{id}"), None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["product"]["location"], "A-1-1");
    assert_eq!(body["product"]["location_status"], "assigned");
    assert_eq!(body["product"]["reserved"], false);

    let response = app.request(Method::GET, "/api/inventory/list", None).await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn occupied_slot_conflicts_but_self_reassignment_succeeds() {
    let app = TestApp::new().await;

    let x = create_product(&app, "SLOT-X").await;
    let y = create_product(&app, "SLOT-Y").await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/assign-location",
            Some(json!({"product_id": x, "zona": "A", "nivel": 1, "posicion": 1})),
        )
        .await;
    assert_eq!(response.status(), 200);

    // Another product cannot take the same slot
    let response = app
        .request(
            Method::POST,
            "/api/inventory/assign-location",
            Some(json!({"product_id": y, "zona": "A", "nivel": 1, "posicion": 1})),
        )
        .await;
    assert_eq!(response.status(), 409);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("A-1-1"));

    // Reassigning the same slot to its holder is fine (self-exclusion)
    let response = app
        .request(
            Method::POST,
            "/api/inventory/assign-location",
            Some(json!({"product_id": x, "zona": "A", "nivel": 1, "posicion": 1})),
        )
        .await;
    assert_eq!(response.status(), 200);

    // A different slot still works for the other product
    let response = app
        .request(
            Method::POST,
            "/api/inventory/assign-location",
            Some(json!({"product_id": y, "zona": "A", "nivel": 1, "posicion": 2})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["location"], "A-1-2");
}

#[tokio::test]
async fn slot_inputs_are_range_checked_before_any_write() {
    let app = TestApp::new().await;
    let id = create_product(&app, "SLOT-RANGE").await;

    for payload in [
        json!({"product_id": id, "zona": "AB", "nivel": 1, "posicion": 1}),
        json!({"product_id": id, "zona": "A", "nivel": 0, "posicion": 1}),
        json!({"product_id": id, "zona": "A", "nivel": 5, "posicion": 1}),
        json!({"product_id": id, "zona": "A", "nivel": 1, "posicion": 0}),
        json!({"product_id": id, "zona": "A", "nivel": 1, "posicion": 9}),
    ] {
        let response = app
            .request(Method::POST, "/api/inventory/assign-location", Some(payload))
            .await;
        assert_eq!(response.status(), 400);
    }

    // Nothing was written
    let response = app
        .request(Method::GET, &format!("/api/inventory/show/{id}"), None)
        .await;
    let body = response_json(response).await;
    assert!(body["product"]["location"].is_null());
}

#[tokio::test]
async fn assigning_to_unknown_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/assign-location",
            Some(json!({"product_id": 424242, "zona": "B", "nivel": 2, "posicion": 3})),
        )
        .await;
    assert_eq!(response.status(), 404);
}
