//! HTTP access through Mason controls.

use crate::document::{Control, Document};
use anyhow::{Context, Result};
use reqwest::{header, Method, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;

pub const CUSTOMERS: &str = "/api/customers/";
pub const PRODUCTS: &str = "/api/products/";
pub const ORDERS: &str = "/api/orders/";
pub const PRODUCTORDERS: &str = "/api/productorders/";
pub const STOCK: &str = "/api/stock/";

/// Non-success reply, decoded from the Mason `@error` member when present.
#[derive(Debug, Error)]
#[error("{status}: {message}{}", .details.as_ref().map(|d| format!(" ({})", d)).unwrap_or_default())]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    fn from_body(status: StatusCode, body: &[u8]) -> Self {
        let error = serde_json::from_slice::<Document>(body).ok().and_then(|d| d.error);
        match error {
            Some(e) => ApiError {
                status,
                message: e.message,
                details: e.messages.into_iter().next(),
            },
            None => ApiError {
                status,
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
                details: None,
            },
        }
    }
}

#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub location: Option<String>,
    pub document: Option<Document>,
}

impl Reply {
    pub fn location(&self) -> Result<&str> {
        self.location.as_deref().context("response has no Location header")
    }
}

/// Trailing numeric id of an item href such as `/api/orders/7/`.
pub fn id_from_location(href: &str) -> Result<i64> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|last| last.parse().ok())
        .with_context(|| format!("no numeric id in '{}'", href))
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Follow `control` with an optional JSON body. Non-2xx replies become [`ApiError`].
    pub async fn send(&self, control: &Control, body: Option<&Value>) -> Result<Reply> {
        let method = Method::from_bytes(control.http_method().as_bytes())
            .with_context(|| format!("invalid method '{}'", control.http_method()))?;
        let url = format!("{}{}", self.base_url, control.href);
        tracing::debug!(%method, href = %control.href, "request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.context("reading response body")?;
        if !status.is_success() {
            return Err(ApiError::from_body(status, &bytes).into());
        }
        let document = if bytes.is_empty() {
            None
        } else {
            Some(
                serde_json::from_slice(&bytes)
                    .with_context(|| format!("{} did not return a Mason document", control.href))?,
            )
        };
        Ok(Reply {
            status,
            location,
            document,
        })
    }

    pub async fn get(&self, href: &str) -> Result<Document> {
        let reply = self.send(&Control::get(href), None).await?;
        reply.document.with_context(|| format!("empty body from {}", href))
    }

    /// Post `body` through the named control of `from`; returns the new item's href.
    pub async fn create(&self, from: &Document, control: &str, body: &Value) -> Result<String> {
        let reply = self.send(from.control(control)?, Some(body)).await?;
        Ok(reply.location()?.to_string())
    }

    /// Send the item's `edit` control. The body holds every property the control's
    /// schema declares, taken from `changes` first and the current item second.
    pub async fn edit(&self, item: &Document, changes: &Map<String, Value>) -> Result<()> {
        let control = item.control("edit")?;
        let mut body = Map::new();
        for key in control.schema_properties() {
            if let Some(v) = changes.get(&key).or_else(|| item.field(&key)) {
                body.insert(key, v.clone());
            }
        }
        self.send(control, Some(&Value::Object(body))).await?;
        Ok(())
    }

    pub async fn delete(&self, item: &Document) -> Result<()> {
        self.send(item.control("delete")?, None).await?;
        Ok(())
    }

    /// First item of the collection at `href` whose `field` equals `value`, fetched through its `self` link.
    pub async fn find(&self, href: &str, key: &str, field: &str, value: &str) -> Result<Document> {
        let collection = self.get(href).await?;
        let item = collection
            .items(key)?
            .into_iter()
            .find(|item| item.field(field).is_some_and(|v| matches_value(v, value)))
            .with_context(|| format!("no item with {} '{}' in {}", field, value, href))?;
        self.get(&item.control("self")?.href).await
    }
}

fn matches_value(v: &Value, wanted: &str) -> bool {
    match v {
        Value::String(s) => s == wanted,
        other => other.to_string() == wanted,
    }
}
