mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

fn customer_json() -> serde_json::Value {
    json!({
        "firstName": "testName",
        "lastName": "testLastName",
        "email": "testemail@luukku.com",
        "phone": "04012345678"
    })
}

#[tokio::test]
async fn collection_lists_customers_with_controls() {
    let app = app().await;
    let resp = get(&app, "/api/customers/").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers["content-type"], "application/vnd.mason+json");
    assert_gettable(&app, &resp.body, &["self", "customer:get-customers"]).await;
    let customers = resp.body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 3);
    for item in customers {
        assert_gettable(&app, &json!({"@namespaces": resp.body["@namespaces"], "@controls": item["@controls"]}), &["self", "profile"]).await;
        assert!(item.get("id").is_none());
    }
    assert_eq!(resp.body["@controls"]["customer:add-customer"]["method"], "POST");
}

#[tokio::test]
async fn post_creates_and_rejects_duplicates() {
    let app = app().await;

    let resp = send_raw(&app, Method::POST, "/api/customers/", "text/plain", "notjson").await;
    assert_eq!(resp.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(resp.body["@error"]["@message"], "Unsupported media type");

    let resp = post(&app, "/api/customers/", customer_json()).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let location = resp.location();
    assert!(location.starts_with("/api/customers/"));
    let created = get(&app, &location).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["email"], "testemail@luukku.com");
    assert_eq!(location, format!("/api/customers/{}/", created.body["uuid"].as_str().unwrap()));

    let resp = post(&app, "/api/customers/", customer_json()).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(resp.body["@error"]["@message"], "Already exists");

    let mut missing = customer_json();
    missing.as_object_mut().unwrap().remove("email");
    let resp = post(&app, "/api/customers/", missing).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["@error"]["@message"], "Invalid JSON document");
}

#[tokio::test]
async fn item_get_put_and_delete() {
    let app = app().await;
    let href = customer_href(&app, 0).await;

    let resp = get(&app, &href).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_gettable(&app, &resp.body, &["self", "profile", "collection", "customer:customer-orders"]).await;
    assert_eq!(resp.body["orders"].as_array().unwrap().len(), 1);
    assert_eq!(resp.body["@controls"]["edit"]["method"], "PUT");
    assert_eq!(resp.body["@controls"]["edit"]["encoding"], "json");

    assert_eq!(get(&app, "/api/customers/no-such-uuid/").await.status, StatusCode::NOT_FOUND);

    let edit = resp.href("edit");
    let resp = send_raw(&app, Method::PUT, &edit, "text", "notjson").await;
    assert_eq!(resp.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(put(&app, "/api/customers/no-such-uuid/", customer_json()).await.status, StatusCode::NOT_FOUND);

    // another customer's email
    let mut taken = customer_json();
    taken["email"] = json!("pekka.pakkala@gmail.com");
    assert_eq!(put(&app, &edit, taken).await.status, StatusCode::CONFLICT);

    // keeping the own email is fine
    let mut same = customer_json();
    same["email"] = json!("a.heikkinen@luukku.com");
    assert_eq!(put(&app, &edit, same).await.status, StatusCode::NO_CONTENT);

    assert_eq!(put(&app, &edit, customer_json()).await.status, StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &href).await.body["email"], "testemail@luukku.com");

    let mut invalid = customer_json();
    invalid["firstName"] = json!(5);
    assert_eq!(put(&app, &edit, invalid).await.status, StatusCode::BAD_REQUEST);

    assert_eq!(delete(&app, &href).await.status, StatusCode::NO_CONTENT);
    assert_eq!(delete(&app, &href).await.status, StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, "/api/customers/no-such-uuid/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_customer_keeps_orders_without_owner() {
    let app = app().await;
    let href = customer_href(&app, 0).await;
    assert_eq!(delete(&app, &href).await.status, StatusCode::NO_CONTENT);

    let orders = get(&app, "/api/orders/").await;
    let list = orders.body["orders"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert!(list[0]["customerId"].is_null());

    let order = get(&app, "/api/orders/1/").await;
    assert!(order.body["@controls"].get("order:by-customer").is_none());
}

#[tokio::test]
async fn customer_orders_subresource() {
    let app = app().await;
    let uuid = customer_uuid(&app, 0).await;
    let resp = get(&app, &format!("/api/customers/{uuid}/orders/")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["orders"].as_array().unwrap().len(), 1);
    assert_eq!(resp.body["orders"][0]["customerId"], uuid.as_str());

    let other = customer_uuid(&app, 1).await;
    let resp = get(&app, &format!("/api/customers/{other}/orders/")).await;
    assert!(resp.body["orders"].as_array().unwrap().is_empty());
}
