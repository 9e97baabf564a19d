mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

fn line_json() -> serde_json::Value {
    json!({"orderId": 1, "productId": 1, "quantity": 1})
}

#[tokio::test]
async fn collection_lists_line_items() {
    let app = app().await;
    let resp = get(&app, "/api/productorders/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_gettable(&app, &resp.body, &["self", "productorder:get-productorders"]).await;
    assert_eq!(resp.body["productorders"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn post_checks_references() {
    let app = app().await;
    let resp = send_raw(&app, Method::POST, "/api/productorders/", "text/plain", "notjson").await;
    assert_eq!(resp.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let resp = post(&app, "/api/productorders/", line_json()).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.location(), "/api/productorders/3/");
    assert_eq!(get(&app, &resp.location()).await.status, StatusCode::OK);

    let mut bad_order = line_json();
    bad_order["orderId"] = json!(999);
    assert_eq!(post(&app, "/api/productorders/", bad_order).await.status, StatusCode::NOT_FOUND);

    let mut bad_product = line_json();
    bad_product["productId"] = json!(999);
    assert_eq!(post(&app, "/api/productorders/", bad_product).await.status, StatusCode::NOT_FOUND);

    let mut zero = line_json();
    zero["quantity"] = json!(0);
    assert_eq!(post(&app, "/api/productorders/", zero).await.status, StatusCode::BAD_REQUEST);

    let mut missing = line_json();
    missing.as_object_mut().unwrap().remove("quantity");
    assert_eq!(post(&app, "/api/productorders/", missing).await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_controls_put_and_delete() {
    let app = app().await;
    let resp = get(&app, "/api/productorders/1/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_gettable(
        &app,
        &resp.body,
        &["self", "profile", "collection", "productorder:get-order", "productorder:get-product"],
    )
    .await;
    assert_eq!(resp.href("productorder:get-product"), "/api/products/Sateenvarjo/");
    assert_eq!(get(&app, "/api/productorders/999/").await.status, StatusCode::NOT_FOUND);

    let edit = resp.href("edit");
    assert_eq!(send_raw(&app, Method::PUT, &edit, "text", "x").await.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(put(&app, "/api/productorders/999/", line_json()).await.status, StatusCode::NOT_FOUND);
    assert_eq!(put(&app, &edit, json!({"orderId": 1})).await.status, StatusCode::BAD_REQUEST);

    let mut more = line_json();
    more["quantity"] = json!(5);
    assert_eq!(put(&app, &edit, more).await.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &edit).await.body["quantity"], 5);

    assert_eq!(delete(&app, &edit).await.status, StatusCode::NO_CONTENT);
    assert_eq!(delete(&app, &edit).await.status, StatusCode::NOT_FOUND);
}
