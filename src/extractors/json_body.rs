//! JSON request body that must be sent as `application/json`.

use crate::error::AppError;
use crate::mason::JSON;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
};
use serde_json::Value;

/// Raw JSON document; schema validation happens in the handler.
/// Wrong or missing content type is 415, an oversized body 413, unparsable JSON 400.
#[derive(Clone, Debug)]
pub struct JsonDocument(pub Value);

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case(JSON))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for JsonDocument
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json)
            .unwrap_or(false);
        if !json_content {
            return Err(AppError::UnsupportedMediaType);
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
                _ => AppError::BadRequest(e.body_text()),
            })?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Validation(format!("Request body is not valid JSON: {}", e)))?;
        Ok(JsonDocument(value))
    }
}
