#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use onlinestore::{apply_migrations, build_router, store, AppState, Settings};
use std::path::Path;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> String {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("location header")
            .to_string()
    }

    pub fn href(&self, control: &str) -> String {
        self.body["@controls"][control]["href"]
            .as_str()
            .unwrap_or_else(|| panic!("control {control} missing in {}", self.body))
            .to_string()
    }
}

/// Router over a fresh in-memory database holding the demo data.
pub async fn app() -> Router {
    let pool = store::connect_in_memory().await.expect("in-memory pool");
    apply_migrations(&pool).await.expect("migrations");
    store::populate(&pool).await.expect("demo data");
    build_router(AppState { pool }, 64 * 1024)
}

/// Router over a seeded database file in `dir`, on a pool of several connections.
pub async fn file_app(dir: &Path) -> Router {
    let settings = Settings {
        database_url: format!("sqlite://{}", dir.join("store.db").display()),
        max_connections: 5,
        ..Settings::default()
    };
    let pool = store::connect(&settings).await.expect("file pool");
    apply_migrations(&pool).await.expect("migrations");
    store::populate(&pool).await.expect("demo data");
    build_router(AppState { pool }, settings.body_limit)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).expect("encode body"))),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    dispatch(app, req).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, content_type: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .expect("request");
    dispatch(app, req).await
}

async fn dispatch(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.expect("infallible");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

/// The `store` namespace and every listed control must be dereferenceable with GET.
pub async fn assert_gettable(app: &Router, doc: &Value, controls: &[&str]) {
    let ns = doc["@namespaces"]["store"]["name"].as_str().expect("store namespace");
    assert_eq!(get(app, ns).await.status, StatusCode::OK, "namespace {ns}");
    for ctrl in controls {
        let href = doc["@controls"][*ctrl]["href"]
            .as_str()
            .unwrap_or_else(|| panic!("control {ctrl} missing"));
        assert_eq!(get(app, href).await.status, StatusCode::OK, "control {ctrl} -> {href}");
    }
}

/// Seeded uuid of the customer at `index` in the collection.
pub async fn customer_href(app: &Router, index: usize) -> String {
    let list = get(app, "/api/customers/").await;
    list.body["customers"][index]["@controls"]["self"]["href"]
        .as_str()
        .expect("customer href")
        .to_string()
}

pub async fn customer_uuid(app: &Router, index: usize) -> String {
    let list = get(app, "/api/customers/").await;
    list.body["customers"][index]["uuid"].as_str().expect("uuid").to_string()
}

pub async fn stock_quantity(app: &Router, product_id: i64) -> i64 {
    let resp = get(app, &format!("/api/stock/{product_id}/")).await;
    assert_eq!(resp.status, StatusCode::OK);
    resp.body["quantity"].as_i64().expect("quantity")
}
