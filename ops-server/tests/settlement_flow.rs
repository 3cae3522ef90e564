//! End-to-end settlement flow
//!
//! Run: cargo test -p ops-server --test settlement_flow

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

/// Create a deferred two-line order and return (order_id, total)
async fn create_deferred_order(app: &axum::Router) -> (String, f64) {
    let (status, body) = request(
        app,
        "POST",
        "/api/orders",
        Some(json!({
            "department": "BAR",
            "guest_name": "Room 214",
            "deferred": true,
            "lines": [
                { "description": "Gin Tonic", "unit_price": 9.5, "quantity": 2 },
                { "description": "Club Sandwich", "unit_price": 12.0, "quantity": 1 },
            ]
        })),
    )
    .await;
    assert_eq!(status, 200, "create order failed: {body}");
    let order = data(&body);
    assert_eq!(order["status"], "DEFERRED");
    assert_eq!(order["payment_status"], "UNPAID");
    (
        order["id"].as_str().unwrap().to_string(),
        order["total"].as_f64().unwrap(),
    )
}

#[tokio::test]
async fn deferred_order_settles_in_two_payments() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "BAR").await;
    let (order_id, total) = create_deferred_order(&app).await;
    assert_eq!(total, 31.0);

    // First partial payment
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CASH", "amount": 20.0 })),
    )
    .await;
    assert_eq!(status, 200, "partial settle failed: {body}");
    let order = data(&body);
    assert_eq!(order["payment_status"], "PARTIAL");
    assert_eq!(order["status"], "DEFERRED");
    assert_eq!(order["paid_amount"], 20.0);

    // Second payment completes the order
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CARD", "amount": 11.0, "reference": "tx-889" })),
    )
    .await;
    assert_eq!(status, 200);
    let order = data(&body);
    assert_eq!(order["payment_status"], "PAID");
    assert_eq!(order["status"], "SETTLED");
    assert_eq!(order["paid_amount"], 31.0);
    assert!(order["settled_at"].is_i64());

    // A settled order refuses further payments
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CASH", "amount": 1.0 })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "ORDER_ALREADY_SETTLED");
}

#[tokio::test]
async fn overpayment_is_rejected_and_leaves_no_trace() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "BAR").await;
    let (order_id, total) = create_deferred_order(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CASH", "amount": total + 5.0 })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "PAYMENT_EXCEEDS_BALANCE");

    // Paid amount and payments list are untouched
    let (_, body) = request(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    let order = data(&body);
    assert_eq!(order["paid_amount"], 0.0);
    assert_eq!(order["payments"].as_array().unwrap().len(), 0);
    assert_eq!(order["payment_status"], "UNPAID");
}

#[tokio::test]
async fn cancelling_a_payment_reverts_settlement() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "BAR").await;
    let (order_id, total) = create_deferred_order(&app).await;

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CARD", "amount": total })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/payments/0/cancel"),
        Some(json!({ "reason": "charge-back" })),
    )
    .await;
    assert_eq!(status, 200, "cancel failed: {body}");
    let order = data(&body);
    assert_eq!(order["payment_status"], "UNPAID");
    assert_eq!(order["status"], "DEFERRED");
    assert_eq!(order["paid_amount"], 0.0);
    assert!(order["settled_at"].is_null());
    assert_eq!(order["payments"][0]["cancelled"], true);

    // Cancelling the same payment twice fails
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/payments/0/cancel"),
        Some(json!({ "reason": "again" })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "PAYMENT_ALREADY_CANCELLED");
}

#[tokio::test]
async fn void_rules() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "BAR").await;
    let (order_id, _) = create_deferred_order(&app).await;

    // Partial payment blocks voiding
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CASH", "amount": 5.0 })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/void"),
        Some(json!({ "reason": "guest dispute" })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "ORDER_HAS_PAYMENTS");

    // After cancelling the payment the void goes through
    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/payments/0/cancel"),
        Some(json!({ "reason": "refund before void" })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/void"),
        Some(json!({ "reason": "guest dispute" })),
    )
    .await;
    assert_eq!(status, 200);
    let order = data(&body);
    assert_eq!(order["status"], "VOID");
    assert_eq!(order["void_reason"], "guest dispute");

    // Voided orders refuse settlement
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/orders/{order_id}/settle"),
        Some(json!({ "method": "CASH", "amount": 1.0 })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "ORDER_ALREADY_VOIDED");
}

#[tokio::test]
async fn discount_rule_applies_to_department_orders() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "BAR").await;
    create_department(&app, "POOL").await;

    // 10% off everything in BAR
    let (status, _) = request(
        &app,
        "POST",
        "/api/discount-rules",
        Some(json!({
            "name": "Happy hour",
            "rule_scope": "DEPARTMENT",
            "department": "BAR",
            "adjustment_type": "PERCENTAGE",
            "adjustment_value": 10.0
        })),
    )
    .await;
    assert_eq!(status, 200);

    let (_, body) = request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "department": "BAR",
            "deferred": true,
            "lines": [{ "description": "Negroni", "unit_price": 10.0, "quantity": 2 }]
        })),
    )
    .await;
    let order = data(&body);
    assert_eq!(order["subtotal"], 20.0);
    assert_eq!(order["discount_total"], 2.0);
    assert_eq!(order["total"], 18.0);
    assert_eq!(order["lines"][0]["line_total"], 18.0);

    // The POOL department is outside the rule's scope
    let (_, body) = request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "department": "POOL",
            "deferred": true,
            "lines": [{ "description": "Lemonade", "unit_price": 10.0, "quantity": 2 }]
        })),
    )
    .await;
    let order = data(&body);
    assert_eq!(order["discount_total"], 0.0);
    assert_eq!(order["total"], 20.0);
}

#[tokio::test]
async fn order_validation_errors() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "BAR").await;

    // Empty orders are rejected
    let (status, body) = request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "department": "BAR", "lines": [] })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "ORDER_EMPTY");

    // Unknown departments are rejected
    let (status, body) = request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "department": "SPA",
            "lines": [{ "description": "Massage", "unit_price": 80.0, "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, 404);
    assert_error_code(&body, "DEPARTMENT_NOT_FOUND");

    // Negative prices are rejected
    let (status, body) = request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "department": "BAR",
            "lines": [{ "description": "Beer", "unit_price": -2.0, "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert_error_code(&body, "VALIDATION_ERROR");
}
