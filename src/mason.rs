//! Mason hypermedia documents: data fields plus `@namespaces`, `@controls` and `@error`.
//!
//! Control semantics follow <https://github.com/JornWildt/Mason/blob/master/Documentation/Mason-draft-2.md>.
//! Only the members this API emits are modelled.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Media type of every Mason response body.
pub const MASON: &str = "application/vnd.mason+json";
/// Media type required on request bodies.
pub const JSON: &str = "application/json";

pub const LINK_RELATIONS_URL: &str = "/api/link-relations/";
pub const ERROR_PROFILE: &str = "/profiles/error/";
pub const CUSTOMER_PROFILE: &str = "/profiles/customer/";
pub const ORDER_PROFILE: &str = "/profiles/order/";
pub const PRODUCT_PROFILE: &str = "/profiles/product/";
pub const PRODUCTORDER_PROFILE: &str = "/profiles/productorder/";
pub const STOCK_PROFILE: &str = "/profiles/stock/";

/// Profile names served under `/profiles/{name}/`.
pub const PROFILES: &[&str] = &["customer", "order", "product", "productorder", "stock", "error"];

/// A single control: a link plus optional method, encoding, title and request schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Control {
    pub fn new(href: impl Into<String>) -> Self {
        Control {
            href: href.into(),
            ..Default::default()
        }
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    pub fn encoding(mut self, encoding: &str) -> Self {
        self.encoding = Some(encoding.to_string());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MasonError {
    #[serde(rename = "@message")]
    pub message: String,
    /// Mason allows several messages; this API always sends exactly one.
    #[serde(rename = "@messages")]
    pub messages: Vec<String>,
}

/// Generic Mason document. Application-specific controls live in
/// [`crate::inventory::InventoryBuilder`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MasonBuilder {
    #[serde(flatten)]
    data: Map<String, Value>,
    #[serde(rename = "@namespaces", default, skip_serializing_if = "BTreeMap::is_empty")]
    namespaces: BTreeMap<String, Namespace>,
    #[serde(rename = "@controls", default, skip_serializing_if = "BTreeMap::is_empty")]
    controls: BTreeMap<String, Control>,
    #[serde(rename = "@error", default, skip_serializing_if = "Option::is_none")]
    error: Option<MasonError>,
}

impl MasonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a document from a serializable item. Non-object items are stored under `value`.
    pub fn from_item<T: Serialize>(item: &T) -> Result<Self, serde_json::Error> {
        let data = match serde_json::to_value(item)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".into(), other);
                map
            }
        };
        Ok(MasonBuilder {
            data,
            ..Default::default()
        })
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.data.insert(key.to_string(), value.into());
    }

    /// Store a list of embedded documents (or any serializable items) under `key`.
    pub fn insert_items<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(items)?;
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.get(name)
    }

    pub fn namespace(&self, ns: &str) -> Option<&Namespace> {
        self.namespaces.get(ns)
    }

    pub fn error(&self) -> Option<&MasonError> {
        self.error.as_ref()
    }

    /// Root documents only, and only in error responses.
    pub fn add_error(&mut self, title: &str, details: impl Into<String>) {
        self.error = Some(MasonError {
            message: title.to_string(),
            messages: vec![details.into()],
        });
    }

    pub fn add_namespace(&mut self, ns: &str, uri: &str) {
        self.namespaces.insert(
            ns.to_string(),
            Namespace {
                name: uri.to_string(),
            },
        );
    }

    pub fn add_control(&mut self, name: &str, control: Control) {
        self.controls.insert(name.to_string(), control);
    }

    /// Plain link control (href only).
    pub fn add_link(&mut self, name: &str, href: impl Into<String>) {
        self.add_control(name, Control::new(href));
    }

    pub fn add_control_post(&mut self, name: &str, title: &str, href: impl Into<String>, schema: Value) {
        self.add_control(
            name,
            Control::new(href)
                .method("POST")
                .encoding("json")
                .title(title)
                .schema(schema),
        );
    }

    /// Adds the `edit` control.
    pub fn add_control_put(&mut self, title: &str, href: impl Into<String>, schema: Value) {
        self.add_control(
            "edit",
            Control::new(href)
                .method("PUT")
                .encoding("json")
                .title(title)
                .schema(schema),
        );
    }

    /// Adds the `delete` control.
    pub fn add_control_delete(&mut self, title: &str, href: impl Into<String>) {
        self.add_control("delete", Control::new(href).method("DELETE").title(title));
    }
}
