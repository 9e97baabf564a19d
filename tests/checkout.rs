mod common;

use axum::http::StatusCode;
use axum::Router;
use common::*;
use serde_json::{json, Value};

async fn order_count(app: &Router) -> usize {
    get(app, "/api/orders/").await.body["orders"].as_array().unwrap().len()
}

fn checkout_body(customer: &str, items: Value) -> Value {
    json!({"customerId": customer, "items": items})
}

#[tokio::test]
async fn places_order_and_decrements_stock() {
    let app = app().await;
    let uuid = customer_uuid(&app, 1).await;
    let body = checkout_body(&uuid, json!([
        {"productId": 1, "quantity": 3},
        {"productId": 2, "quantity": 20}
    ]));
    let resp = post(&app, "/api/checkout/", body).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.location(), "/api/orders/2/");

    let order = get(&app, &resp.location()).await;
    assert_eq!(order.body["customerId"], uuid.as_str());
    assert!(order.body["createdAt"].as_str().is_some_and(|s| !s.is_empty()));
    let lines = order.body["productorders"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["quantity"], 20);

    assert_eq!(stock_quantity(&app, 1).await, 5);
    assert_eq!(stock_quantity(&app, 2).await, 0);
}

#[tokio::test]
async fn insufficient_stock_rolls_everything_back() {
    let app = app().await;
    let uuid = customer_uuid(&app, 0).await;
    let body = checkout_body(&uuid, json!([
        {"productId": 1, "quantity": 3},
        {"productId": 2, "quantity": 21}
    ]));
    let resp = post(&app, "/api/checkout/", body).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.body["@error"]["@message"], "Insufficient stock");

    assert_eq!(stock_quantity(&app, 1).await, 8);
    assert_eq!(stock_quantity(&app, 2).await, 20);
    assert_eq!(order_count(&app).await, 1);
    assert_eq!(get(&app, "/api/productorders/").await.body["productorders"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_references_are_not_found() {
    let app = app().await;
    let uuid = customer_uuid(&app, 0).await;

    let resp = post(&app, "/api/checkout/", checkout_body("nobody", json!([{"productId": 1, "quantity": 1}]))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = post(&app, "/api/checkout/", checkout_body(&uuid, json!([{"productId": 999, "quantity": 1}]))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    assert_eq!(delete(&app, "/api/stock/2/").await.status, StatusCode::NO_CONTENT);
    let resp = post(&app, "/api/checkout/", checkout_body(&uuid, json!([
        {"productId": 1, "quantity": 1},
        {"productId": 2, "quantity": 1}
    ])))
    .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(stock_quantity(&app, 1).await, 8);
    assert_eq!(order_count(&app).await, 1);
}

#[tokio::test]
async fn malformed_orders_are_rejected() {
    let app = app().await;
    let uuid = customer_uuid(&app, 0).await;

    let resp = post(&app, "/api/checkout/", checkout_body(&uuid, json!([]))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = post(&app, "/api/checkout/", checkout_body(&uuid, json!([
        {"productId": 1, "quantity": 1},
        {"productId": 1, "quantity": 2}
    ])))
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = post(&app, "/api/checkout/", checkout_body(&uuid, json!([{"productId": 1, "quantity": 0}]))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = post(&app, "/api/checkout/", json!({"customerId": uuid})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(order_count(&app).await, 1);
}

/// Fire `count` single-unit checkouts of product 1 at once.
async fn concurrent_checkouts(app: &Router, customer: &str, count: usize) -> Vec<TestResponse> {
    let mut tasks = Vec::with_capacity(count);
    for _ in 0..count {
        let app = app.clone();
        let body = checkout_body(customer, json!([{"productId": 1, "quantity": 1}]));
        tasks.push(tokio::spawn(async move { post(&app, "/api/checkout/", body).await }));
    }
    let mut responses = Vec::with_capacity(count);
    for task in tasks {
        responses.push(task.await.unwrap());
    }
    responses
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_all_succeed_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let app = file_app(dir.path()).await;
    let uuid = customer_uuid(&app, 0).await;
    let resp = put(&app, "/api/stock/1/", json!({"productId": 1, "quantity": 1000})).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    for resp in concurrent_checkouts(&app, &uuid, 40).await {
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    }
    assert_eq!(stock_quantity(&app, 1).await, 960);
    assert_eq!(order_count(&app).await, 41);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checkouts_never_oversell() {
    let dir = tempfile::tempdir().unwrap();
    let app = file_app(dir.path()).await;
    let uuid = customer_uuid(&app, 0).await;
    let resp = put(&app, "/api/stock/1/", json!({"productId": 1, "quantity": 30})).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let (mut created, mut refused) = (0, 0);
    for resp in concurrent_checkouts(&app, &uuid, 40).await {
        match resp.status {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => {
                assert_eq!(resp.body["@error"]["@message"], "Insufficient stock");
                refused += 1;
            }
            other => panic!("unexpected {other}: {}", resp.body),
        }
    }
    assert_eq!((created, refused), (30, 10));
    assert_eq!(stock_quantity(&app, 1).await, 0);
    assert_eq!(order_count(&app).await, 31);
}
