//! Mason documents as received from the server.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Control {
    pub fn get(href: impl Into<String>) -> Self {
        Control {
            href: href.into(),
            ..Default::default()
        }
    }

    /// Controls without a method are plain links.
    pub fn http_method(&self) -> &str {
        self.method.as_deref().unwrap_or("GET")
    }

    /// Property names declared by the control's request schema.
    pub fn schema_properties(&self) -> Vec<String> {
        self.schema
            .as_ref()
            .and_then(|s| s.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MasonError {
    #[serde(rename = "@message")]
    pub message: String,
    #[serde(rename = "@messages", default)]
    pub messages: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "@namespaces", default)]
    pub namespaces: BTreeMap<String, Value>,
    #[serde(rename = "@controls", default)]
    pub controls: BTreeMap<String, Control>,
    #[serde(rename = "@error", default)]
    pub error: Option<MasonError>,
}

impl Document {
    pub fn control(&self, name: &str) -> Result<&Control> {
        self.controls
            .get(name)
            .with_context(|| format!("document has no '{}' control", name))
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn i64_field(&self, name: &str) -> Result<i64> {
        self.field(name)
            .and_then(Value::as_i64)
            .with_context(|| format!("document has no integer '{}'", name))
    }

    /// Field rendered for display: strings bare, missing or null as empty.
    pub fn display_field(&self, name: &str) -> String {
        match self.field(name) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Embedded documents stored under `key`.
    pub fn items(&self, key: &str) -> Result<Vec<Document>> {
        let raw = self
            .fields
            .get(key)
            .with_context(|| format!("document has no '{}' list", key))?;
        serde_json::from_value(raw.clone()).with_context(|| format!("'{}' is not a list of documents", key))
    }
}
