//! End-to-end inter-department transfer flow
//!
//! Run: cargo test -p ops-server --test transfer_flow

mod common;

use common::{assert_error_code, data, request, test_app};
use serde_json::json;

async fn create_department(app: &axum::Router, code: &str) {
    let (status, _) = request(
        app,
        "POST",
        "/api/departments",
        Some(json!({ "code": code, "name": code })),
    )
    .await;
    assert_eq!(status, 200);
}

/// Create an item and return its id
async fn create_item(app: &axum::Router, sku: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/inventory-items",
        Some(json!({ "sku": sku, "name": "House Red", "unit": "bottle" })),
    )
    .await;
    assert_eq!(status, 200, "create item failed: {body}");
    data(&body)["id"].as_str().unwrap().to_string()
}

async fn set_stock(app: &axum::Router, code: &str, item: &str, on_hand: i64) {
    let (status, body) = request(
        app,
        "PUT",
        &format!("/api/departments/{code}/inventory"),
        Some(json!({ "item": item, "on_hand": on_hand })),
    )
    .await;
    assert_eq!(status, 200, "set stock failed: {body}");
}

/// Read the on-hand quantity of `item` in `code`, or None when no row exists
async fn on_hand(app: &axum::Router, code: &str, item: &str) -> Option<i64> {
    let (_, body) = request(app, "GET", &format!("/api/departments/{code}/inventory"), None).await;
    data(&body)
        .as_array()
        .unwrap()
        .iter()
        .find(|level| level["item"] == item)
        .map(|level| level["on_hand"].as_i64().unwrap())
}

#[tokio::test]
async fn transfer_moves_stock_and_writes_audit_row() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "CELLAR").await;
    create_department(&app, "BAR").await;
    let item = create_item(&app, "WINE-001").await;
    set_stock(&app, "CELLAR", &item, 24).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/departments/CELLAR/transfer",
        Some(json!({
            "item": item,
            "to_department": "BAR",
            "quantity": 6,
            "note": "evening service",
            "requested_by": "M. Duarte"
        })),
    )
    .await;
    assert_eq!(status, 200, "transfer failed: {body}");
    let transfer = data(&body);
    assert_eq!(transfer["quantity"], 6);
    assert_eq!(transfer["status"], "COMPLETED");
    let reference = transfer["reference"].as_str().unwrap();
    assert!(reference.starts_with("TRF-"));

    // Stock is conserved across the two departments
    assert_eq!(on_hand(&app, "CELLAR", &item).await, Some(18));
    assert_eq!(on_hand(&app, "BAR", &item).await, Some(6));

    // The audit row is queryable
    let (_, body) = request(&app, "GET", "/api/transfers?department=BAR", None).await;
    let page = data(&body);
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["items"][0]["reference"], reference);
    assert_eq!(page["items"][0]["from_code"], "CELLAR");
    assert_eq!(page["items"][0]["to_code"], "BAR");
}

#[tokio::test]
async fn transfer_into_department_without_stock_row_creates_it() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "CELLAR").await;
    create_department(&app, "POOL").await;
    let item = create_item(&app, "WINE-002").await;
    set_stock(&app, "CELLAR", &item, 3).await;

    // Destination has no stock_level row yet
    assert_eq!(on_hand(&app, "POOL", &item).await, None);

    let (status, _) = request(
        &app,
        "POST",
        "/api/departments/CELLAR/transfer",
        Some(json!({ "item": item, "to_department": "POOL", "quantity": 3 })),
    )
    .await;
    assert_eq!(status, 200);

    assert_eq!(on_hand(&app, "CELLAR", &item).await, Some(0));
    assert_eq!(on_hand(&app, "POOL", &item).await, Some(3));
}

#[tokio::test]
async fn insufficient_stock_rejected_without_partial_state() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "CELLAR").await;
    create_department(&app, "BAR").await;
    let item = create_item(&app, "WINE-003").await;
    set_stock(&app, "CELLAR", &item, 2).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/departments/CELLAR/transfer",
        Some(json!({ "item": item, "to_department": "BAR", "quantity": 5 })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "INSUFFICIENT_STOCK");

    // Neither stock row moved and no audit row was written
    assert_eq!(on_hand(&app, "CELLAR", &item).await, Some(2));
    assert_eq!(on_hand(&app, "BAR", &item).await, None);
    let (_, body) = request(&app, "GET", "/api/transfers", None).await;
    assert_eq!(data(&body)["pagination"]["total"], 0);
}

#[tokio::test]
async fn transfer_validation() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "CELLAR").await;
    create_department(&app, "BAR").await;
    let item = create_item(&app, "WINE-004").await;
    set_stock(&app, "CELLAR", &item, 10).await;

    // Zero and negative quantities
    for quantity in [0, -4] {
        let (status, body) = request(
            &app,
            "POST",
            "/api/departments/CELLAR/transfer",
            Some(json!({ "item": item, "to_department": "BAR", "quantity": quantity })),
        )
        .await;
        assert_eq!(status, 400);
        assert_error_code(&body, "VALIDATION_ERROR");
    }

    // Transfers to the same department
    let (status, body) = request(
        &app,
        "POST",
        "/api/departments/CELLAR/transfer",
        Some(json!({ "item": item, "to_department": "CELLAR", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "BUSINESS_RULE_VIOLATION");

    // Unknown destination
    let (status, body) = request(
        &app,
        "POST",
        "/api/departments/CELLAR/transfer",
        Some(json!({ "item": item, "to_department": "SPA", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, 404);
    assert_error_code(&body, "DEPARTMENT_NOT_FOUND");

    // Department without a stock row for the item
    let item2 = create_item(&app, "WINE-005").await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/departments/BAR/transfer",
        Some(json!({ "item": item2, "to_department": "CELLAR", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, 404);
    assert_error_code(&body, "STOCK_LEVEL_NOT_FOUND");

    // Nothing was recorded by any of the failed attempts
    let (_, body) = request(&app, "GET", "/api/transfers", None).await;
    assert_eq!(data(&body)["pagination"]["total"], 0);
}

#[tokio::test]
async fn department_with_stock_cannot_be_deleted() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "CELLAR").await;
    create_department(&app, "BAR").await;
    let item = create_item(&app, "WINE-006").await;
    set_stock(&app, "CELLAR", &item, 1).await;

    let (status, body) = request(&app, "DELETE", "/api/departments/CELLAR", None).await;
    assert_eq!(status, 422);
    assert_error_code(&body, "DEPARTMENT_HAS_STOCK");

    // Draining the stock unblocks deletion
    let (status, _) = request(
        &app,
        "POST",
        "/api/departments/CELLAR/transfer",
        Some(json!({ "item": item, "to_department": "BAR", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = request(&app, "DELETE", "/api/departments/CELLAR", None).await;
    assert_eq!(status, 200, "delete failed: {body}");
}
