//! End-to-end smoke test: full order → payment → report flow through the
//! HTTP router against an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use comanda_server::{AppState, Config};

async fn app() -> Router {
    let config = Config::with_overrides("unused", 0);
    let state = AppState::in_memory(config).await.expect("state");
    comanda_server::api::router().with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn as_decimal(value: &Value) -> rust_decimal::Decimal {
    value.as_str().expect("decimal string").parse().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_dining_flow_over_http() {
    let app = app().await;

    // Seed menu and table
    let (status, menu_item) = send(
        &app,
        "POST",
        "/api/menu",
        Some(json!({"name": "Paella", "category": "MAIN", "price": "12.50"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Monetary fields travel as decimal strings
    assert_eq!(menu_item["price"], json!("12.50"));
    let menu_id = menu_item["id"].as_str().unwrap().to_string();

    let (status, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"table_number": 1, "capacity": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let table_id = table["id"].as_str().unwrap().to_string();

    // Create an order: 2 × 12.50
    let (status, order) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "table": table_id,
            "customer_name": "Ana",
            "items": [{"menu_item_id": menu_id, "quantity": 2}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["total_price"], json!("25.00"));
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    let order_id = order["id"].as_str().unwrap().to_string();

    // The table is now occupied
    let (_, table) = send(&app, "GET", &format!("/api/tables/{table_id}"), None).await;
    assert_eq!(table["is_available"], json!(false));

    // Pay: amount pinned to the total, tax derived server-side
    let (status, payment) = send(
        &app,
        "POST",
        "/api/payments",
        Some(json!({
            "order": order_id,
            "payment_method": "CARD",
            "tip_amount": "1.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payment["payment_status"], "PENDING");
    assert_eq!(payment["amount"], json!("25.00"));
    let final_amount = as_decimal(&payment["final_amount"]);
    let expected = as_decimal(&payment["amount"]) + as_decimal(&payment["tip_amount"])
        + as_decimal(&payment["tax_amount"])
        - as_decimal(&payment["discount_amount"]);
    assert_eq!(final_amount, expected);
    let payment_id = payment["id"].as_str().unwrap().to_string();

    // A second payment for the same order conflicts
    let (status, conflict) = send(
        &app,
        "POST",
        "/api/payments",
        Some(json!({"order": order_id, "payment_method": "CASH"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["code"], "E0004");

    // Completing settles the order and frees the table together
    let (status, completed) = send(
        &app,
        "POST",
        &format!("/api/payments/{payment_id}/complete_payment"),
        Some(json!({"transaction_id": "tx-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["payment_status"], "COMPLETED");

    let (_, order) = send(&app, "GET", &format!("/api/orders/{order_id}"), None).await;
    assert_eq!(order["status"], "SERVED");
    let (_, table) = send(&app, "GET", &format!("/api/tables/{table_id}"), None).await;
    assert_eq!(table["is_available"], json!(true));

    // Completing twice is a state conflict
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/payments/{payment_id}/complete_payment"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0005");

    // The day's report sees the order and the completed payment
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d");
    let (status, report) = send(
        &app,
        "GET",
        &format!("/api/reports/daily_sales?date={today}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_orders"], json!(1));
    assert_eq!(report["total_revenue"], json!("25.00"));
    assert_eq!(report["total_payments"], json!(1));
    assert_eq!(report["average_order_value"], json!("25.00"));
}

#[tokio::test]
async fn validation_errors_use_the_envelope() {
    let app = app().await;

    let (status, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"table_number": 1, "capacity": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let table_id = table["id"].as_str().unwrap().to_string();

    // Empty order
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({"table": table_id, "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");

    // Unknown id
    let (status, body) = send(&app, "GET", "/api/orders/restaurant_order:missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    // Duplicate table number
    let (status, body) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"table_number": 1, "capacity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn double_booking_is_rejected_over_http() {
    let app = app().await;

    let (_, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(json!({"table_number": 7, "capacity": 4})),
    )
    .await;
    let table_id = table["id"].as_str().unwrap().to_string();

    let booking = json!({
        "customer_name": "Luis",
        "customer_phone": "600654321",
        "table": table_id,
        "date": "2026-08-07",
        "time": "20:30",
        "party_size": 2
    });

    let (status, first) = send(&app, "POST", "/api/reservations", Some(booking.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "BOOKED");

    let (status, second) = send(&app, "POST", "/api/reservations", Some(booking)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(second["code"], "E0002");
}
