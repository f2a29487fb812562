mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

async fn create_product(app: &TestApp, name: &str, sku: &str) -> i64 {
    let response = app
        .request(
            Method::POST,
            "/api/inventory/store",
            Some(json!({"nombre": name, "sku": sku, "cantidad": 1})),
        )
        .await;
    assert_eq!(response.status(), 200);
    response_json(response).await["data"]["id"]
        .as_i64()
        .expect("product id")
}

async fn create_report(app: &TestApp, product_id: i64, reason: &str) -> i64 {
    let response = app
        .request(
            Method::POST,
            "/api/inventory/reportes",
            Some(json!({
                "producto_id": product_id,
                "motivo": reason,
                "reportado_por": "site foreman"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    response_json(response).await["data"]["id"]
        .as_i64()
        .expect("report id")
}

#[tokio::test]
async fn report_snapshots_product_at_creation_time() {
    let app = TestApp::new().await;
    let pid = create_product(&app, "PVC tube", "REP-1").await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/reportes",
            Some(json!({
                "producto_id": pid,
                "motivo": "material never arrived on site",
                "reportado_por": "site foreman"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let report = body["data"].clone();
    assert_eq!(report["product_name"], "PVC tube");
    assert_eq!(report["product_sku"], "REP-1");
    // Manual products carry no project; the snapshot records the fallback
    assert_eq!(report["project_name"], "Sin proyecto");
    assert_eq!(report["status"], "pending");
    assert!(report["reviewed_at"].is_null());
    assert!(report["resolved_at"].is_null());

    // Later product edits do not touch the snapshot
    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/update/{pid}"),
            Some(json!({"nombre": "PVC tube (renamed)"})),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(Method::GET, "/api/inventory/reportes", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["reportes"][0]["product_name"], "PVC tube");
}

#[tokio::test]
async fn report_against_unknown_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/inventory/reportes",
            Some(json!({
                "producto_id": 999,
                "motivo": "missing",
                "reportado_por": "someone"
            })),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn review_then_resolve_stamps_each_transition() {
    let app = TestApp::new().await;
    let pid = create_product(&app, "Drywall sheet", "REP-2").await;
    let rid = create_report(&app, pid, "short delivery").await;

    // Reviewed with no actor named: stamped by "System"
    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/reportes/{rid}"),
            Some(json!({"estado": "reviewed", "notas": "checking with carrier"})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let report = body["data"].clone();
    assert_eq!(report["status"], "reviewed");
    assert_eq!(report["reviewed_by"], "System");
    assert!(!report["reviewed_at"].is_null());
    assert!(report["resolved_at"].is_null());
    assert_eq!(report["notes"], "checking with carrier");

    // Resolved with an explicit actor and solution
    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/reportes/{rid}"),
            Some(json!({
                "estado": "resolved",
                "solucion": "replacement shipped",
                "resuelto_por": "maria"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let report = body["data"].clone();
    assert_eq!(report["status"], "resolved");
    assert_eq!(report["resolved_by"], "maria");
    assert!(!report["resolved_at"].is_null());
    assert_eq!(report["solution"], "replacement shipped");
    // The earlier review stamp is untouched
    assert_eq!(report["reviewed_by"], "System");
}

#[tokio::test]
async fn resolving_directly_leaves_review_stamp_unset() {
    let app = TestApp::new().await;
    let pid = create_product(&app, "Conduit", "REP-3").await;
    let rid = create_report(&app, pid, "never arrived").await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/reportes/{rid}"),
            Some(json!({"estado": "resolved"})),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let report = body["data"].clone();
    assert_eq!(report["resolved_by"], "System");
    assert!(!report["resolved_at"].is_null());
    assert!(report["reviewed_at"].is_null());
    assert!(report["reviewed_by"].is_null());
}

#[tokio::test]
async fn status_cannot_move_backward() {
    let app = TestApp::new().await;
    let pid = create_product(&app, "Junction box", "REP-4").await;
    let rid = create_report(&app, pid, "wrong reference").await;

    let response = app
        .request(
            Method::PUT,
            &format!("/api/inventory/reportes/{rid}"),
            Some(json!({"estado": "resolved"})),
        )
        .await;
    assert_eq!(response.status(), 200);

    // Backward to reviewed, including via the Spanish wire value
    for estado in ["reviewed", "pendiente"] {
        let response = app
            .request(
                Method::PUT,
                &format!("/api/inventory/reportes/{rid}"),
                Some(json!({"estado": estado})),
            )
            .await;
        assert_eq!(response.status(), 400, "estado {estado} should be rejected");
    }

    let response = app
        .request(Method::GET, "/api/inventory/reportes", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["reportes"][0]["status"], "resolved");
}

#[tokio::test]
async fn delete_report_is_strict_about_missing_rows() {
    let app = TestApp::new().await;
    let pid = create_product(&app, "Clamp", "REP-5").await;
    let rid = create_report(&app, pid, "damaged on arrival").await;

    let response = app
        .request(Method::DELETE, &format!("/api/inventory/reportes/{rid}"), None)
        .await;
    assert_eq!(response.status(), 200);

    // Unlike product deletion, a second delete is an error
    let response = app
        .request(Method::DELETE, &format!("/api/inventory/reportes/{rid}"), None)
        .await;
    assert_eq!(response.status(), 404);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn deleting_a_product_cascades_to_its_reports() {
    let app = TestApp::new().await;
    let pid = create_product(&app, "Cable drum", "REP-6").await;
    create_report(&app, pid, "first issue").await;
    create_report(&app, pid, "second issue").await;

    let other = create_product(&app, "Other product", "REP-7").await;
    let surviving = create_report(&app, other, "unrelated issue").await;

    let response = app
        .request(Method::DELETE, &format!("/api/inventory/destroy/{pid}"), None)
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(Method::GET, "/api/inventory/reportes", None)
        .await;
    let body = response_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["reportes"][0]["id"], surviving);
}

#[tokio::test]
async fn update_unknown_report_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::PUT,
            "/api/inventory/reportes/4242",
            Some(json!({"estado": "reviewed"})),
        )
        .await;
    assert_eq!(response.status(), 404);
}
