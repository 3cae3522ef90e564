//! CRUD flows for the administrative resources: sections, employees,
//! cleaning tasks, exchange rates and tax settings.
//!
//! Run: cargo test -p ops-server --test operations_flow

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

async fn create_section(app: &axum::Router, department: &str, name: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/sections",
        Some(json!({ "name": name, "department": department })),
    )
    .await;
    assert_eq!(status, 200, "create section failed: {body}");
    data(&body)["id"].as_str().unwrap().to_string()
}

async fn create_employee(app: &axum::Router, staff_number: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/employees",
        Some(json!({
            "staff_number": staff_number,
            "full_name": "Ana Costa",
            "employment": {
                "position": "Housekeeper",
                "hired_at": 1754000000000_i64,
                "weekly_hours": 40.0,
                "hourly_rate": 14.5
            }
        })),
    )
    .await;
    assert_eq!(status, 200, "create employee failed: {body}");
    data(&body)["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn department_codes_are_normalized_and_unique() {
    let (app, _tmp) = test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/departments",
        Some(json!({ "code": " bar ", "name": "Pool Bar" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["code"], "BAR");

    // Same code in different case collides
    let (status, body) = request(
        &app,
        "POST",
        "/api/departments",
        Some(json!({ "code": "Bar", "name": "Other Bar" })),
    )
    .await;
    assert_eq!(status, 409);
    assert_error_code(&body, "DEPARTMENT_CODE_EXISTS");

    // Addressable in any case
    let (status, body) = request(&app, "GET", "/api/departments/bar", None).await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["name"], "Pool Bar");
}

#[tokio::test]
async fn sections_belong_to_departments() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "RESTAURANT").await;
    create_department(&app, "HOUSEKEEPING").await;
    let terrace = create_section(&app, "RESTAURANT", "Terrace").await;
    create_section(&app, "RESTAURANT", "Main Hall").await;
    create_section(&app, "HOUSEKEEPING", "Floor 2").await;

    // Duplicate name inside the same department
    let (status, body) = request(
        &app,
        "POST",
        "/api/sections",
        Some(json!({ "name": "Terrace", "department": "RESTAURANT" })),
    )
    .await;
    assert_eq!(status, 409);
    assert_error_code(&body, "ALREADY_EXISTS");

    // Department-scoped listing
    let (_, body) = request(&app, "GET", "/api/departments/RESTAURANT/sections", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 2);

    // Soft delete hides the section from listings
    let (status, _) = request(&app, "DELETE", &format!("/api/sections/{terrace}"), None).await;
    assert_eq!(status, 200);
    let (_, body) = request(&app, "GET", "/api/departments/RESTAURANT/sections", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 1);

    // ...but it stays addressable by id
    let (status, body) = request(&app, "GET", &format!("/api/sections/{terrace}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["is_active"], false);
}

#[tokio::test]
async fn blocked_employees_cannot_take_cleaning_tasks() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "HOUSEKEEPING").await;
    let section = create_section(&app, "HOUSEKEEPING", "Floor 3").await;
    let employee = create_employee(&app, "HK-017").await;

    // Duplicate staff numbers are rejected
    let (status, body) = request(
        &app,
        "POST",
        "/api/employees",
        Some(json!({
            "staff_number": "HK-017",
            "full_name": "Someone Else",
            "employment": { "position": "Porter", "hired_at": 0 }
        })),
    )
    .await;
    assert_eq!(status, 409);
    assert_error_code(&body, "STAFF_NUMBER_EXISTS");

    // Block (soft delete) the employee
    let (status, _) = request(&app, "DELETE", &format!("/api/employees/{employee}"), None).await;
    assert_eq!(status, 200);

    // Gone from the default listing, still addressable
    let (_, body) = request(&app, "GET", "/api/employees", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 0);
    let (status, body) = request(&app, "GET", &format!("/api/employees/{employee}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["blocked"], true);

    // Assigning a task to the blocked employee fails
    let (status, body) = request(
        &app,
        "POST",
        "/api/cleaning-tasks",
        Some(json!({
            "title": "Deep clean suite 301",
            "section": section,
            "assignee": employee
        })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "EMPLOYEE_BLOCKED");
}

#[tokio::test]
async fn cleaning_task_status_chain() {
    let (app, _tmp) = test_app().await;
    create_department(&app, "HOUSEKEEPING").await;
    let section = create_section(&app, "HOUSEKEEPING", "Floor 1").await;
    let employee = create_employee(&app, "HK-001").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/cleaning-tasks",
        Some(json!({
            "title": "Turnover room 104",
            "section": section,
            "assignee": employee,
            "due_at": 1754600000000_i64
        })),
    )
    .await;
    assert_eq!(status, 200, "create task failed: {body}");
    let task_id = data(&body)["id"].as_str().unwrap().to_string();
    assert_eq!(data(&body)["status"], "PENDING");

    // PENDING cannot jump straight to DONE
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/cleaning-tasks/{task_id}/status"),
        Some(json!({ "status": "DONE" })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "INVALID_TASK_TRANSITION");

    // Walk the legal chain, including one rework loop
    for next in ["IN_PROGRESS", "DONE", "IN_PROGRESS", "DONE", "VERIFIED"] {
        let (status, body) = request(
            &app,
            "POST",
            &format!("/api/cleaning-tasks/{task_id}/status"),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, 200, "transition to {next} failed: {body}");
        assert_eq!(data(&body)["status"], next);
    }

    // VERIFIED is terminal
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/cleaning-tasks/{task_id}/status"),
        Some(json!({ "status": "IN_PROGRESS" })),
    )
    .await;
    assert_eq!(status, 422);
    assert_error_code(&body, "INVALID_TASK_TRANSITION");

    // Status filter
    let (_, body) = request(&app, "GET", "/api/cleaning-tasks?status=VERIFIED", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 1);
    let (_, body) = request(&app, "GET", "/api/cleaning-tasks?status=PENDING", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn exchange_rates_upsert_and_delete() {
    let (app, _tmp) = test_app().await;

    let (status, body) = request(
        &app,
        "PUT",
        "/api/exchange-rates/usd",
        Some(json!({ "rate": 1.08 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["currency"], "USD");
    assert_eq!(data(&body)["rate"], 1.08);

    // Upsert replaces in place
    let (status, body) = request(
        &app,
        "PUT",
        "/api/exchange-rates/USD",
        Some(json!({ "rate": 1.11 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["rate"], 1.11);

    let (_, body) = request(&app, "GET", "/api/exchange-rates", None).await;
    assert_eq!(data(&body).as_array().unwrap().len(), 1);

    // Invalid rates and codes
    let (status, body) = request(
        &app,
        "PUT",
        "/api/exchange-rates/USD",
        Some(json!({ "rate": 0.0 })),
    )
    .await;
    assert_eq!(status, 400);
    assert_error_code(&body, "VALIDATION_ERROR");
    let (status, _) = request(
        &app,
        "PUT",
        "/api/exchange-rates/EURO",
        Some(json!({ "rate": 1.0 })),
    )
    .await;
    assert_eq!(status, 400);

    // Delete, then deleting again 404s
    let (status, _) = request(&app, "DELETE", "/api/exchange-rates/USD", None).await;
    assert_eq!(status, 200);
    let (status, body) = request(&app, "DELETE", "/api/exchange-rates/USD", None).await;
    assert_eq!(status, 404);
    assert_error_code(&body, "EXCHANGE_RATE_NOT_FOUND");
}

#[tokio::test]
async fn tax_settings_singleton_roundtrip() {
    let (app, _tmp) = test_app().await;

    // Defaults before anything is stored
    let (status, body) = request(&app, "GET", "/api/settings/tax", None).await;
    assert_eq!(status, 200);
    assert_eq!(data(&body)["tax_rate"], 10.0);
    assert_eq!(data(&body)["prices_include_tax"], true);

    // Partial update keeps the other fields
    let (status, body) = request(
        &app,
        "PUT",
        "/api/settings/tax",
        Some(json!({ "tax_rate": 21.0, "base_currency": "usd" })),
    )
    .await;
    assert_eq!(status, 200, "update failed: {body}");
    assert_eq!(data(&body)["tax_rate"], 21.0);
    assert_eq!(data(&body)["base_currency"], "USD");
    assert_eq!(data(&body)["prices_include_tax"], true);

    let (_, body) = request(&app, "GET", "/api/settings/tax", None).await;
    assert_eq!(data(&body)["tax_rate"], 21.0);

    // Out-of-range rates rejected
    let (status, body) = request(
        &app,
        "PUT",
        "/api/settings/tax",
        Some(json!({ "tax_rate": 120.0 })),
    )
    .await;
    assert_eq!(status, 400);
    assert_error_code(&body, "VALIDATION_ERROR");

    // New orders pick up the changed rate (tax-inclusive arithmetic)
    create_department(&app, "BAR").await;
    let (_, body) = request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "department": "BAR",
            "deferred": true,
            "lines": [{ "description": "Espresso", "unit_price": 12.1, "quantity": 10 }]
        })),
    )
    .await;
    let order = data(&body);
    assert_eq!(order["total"], 121.0);
    assert_eq!(order["tax_total"], 21.0);
}
