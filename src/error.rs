//! Typed errors and HTTP mapping. API errors render as Mason error documents.

use crate::mason::{MasonBuilder, ERROR_PROFILE, MASON};
use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Requests must be JSON")]
    UnsupportedMediaType,
    #[error("Request body exceeds the size limit")]
    PayloadTooLarge,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InsufficientStock(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Unavailable(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::InsufficientStock(_) => StatusCode::CONFLICT,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db(e) => match db_error_kind(e) {
                Some(DbConflict::RowNotFound) => StatusCode::NOT_FOUND,
                Some(DbConflict::Constraint) => StatusCode::CONFLICT,
                Some(DbConflict::Busy) => StatusCode::SERVICE_UNAVAILABLE,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short title placed in `@error.@message`.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::UnsupportedMediaType => "Unsupported media type",
            AppError::PayloadTooLarge => "Payload too large",
            AppError::Validation(_) => "Invalid JSON document",
            AppError::BadRequest(_) => "Bad request",
            AppError::NotFound(_) => "Not found",
            AppError::Conflict(_) => "Already exists",
            AppError::InsufficientStock(_) => "Insufficient stock",
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::Unavailable(_) => "Service unavailable",
            AppError::Db(e) => match db_error_kind(e) {
                Some(DbConflict::RowNotFound) => "Not found",
                Some(DbConflict::Constraint) => "Constraint violation",
                Some(DbConflict::Busy) => "Service unavailable",
                None => "Database error",
            },
            AppError::Serialize(_) => "Internal server error",
        }
    }

    pub fn document(&self) -> MasonBuilder {
        let mut body = MasonBuilder::new();
        body.add_error(self.title(), self.to_string());
        body.add_link("profile", ERROR_PROFILE);
        body
    }
}

enum DbConflict {
    RowNotFound,
    Constraint,
    Busy,
}

/// SQLITE_BUSY and SQLITE_LOCKED, including their extended codes.
fn is_busy_code(code: &str) -> bool {
    code.parse::<i32>().map(|c| matches!(c & 0xff, 5 | 6)).unwrap_or(false)
}

fn db_error_kind(e: &sqlx::Error) -> Option<DbConflict> {
    match e {
        sqlx::Error::RowNotFound => Some(DbConflict::RowNotFound),
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::CheckViolation
            | ErrorKind::NotNullViolation => Some(DbConflict::Constraint),
            _ if db.code().is_some_and(|c| is_busy_code(&c)) => Some(DbConflict::Busy),
            _ => None,
        },
        _ => None,
    }
}

/// Error document carried in response extensions so [`attach_resource_url`] can
/// re-render it with the request path.
#[derive(Clone, Debug)]
pub struct ErrorDocument(pub MasonBuilder);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = self.document();
        let mut response = render_error(status, &body);
        response.extensions_mut().insert(ErrorDocument(body));
        response
    }
}

fn render_error(status: StatusCode, body: &MasonBuilder) -> Response {
    let bytes = serde_json::to_vec(body).unwrap_or_default();
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(MASON))],
        bytes,
    )
        .into_response()
}

/// Middleware: adds `resource_url` (the request path) to Mason error documents.
/// The router's bare 405 is replaced by the same document, keeping its `Allow` header.
pub async fn attach_resource_url(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;
    let mut body = match response.extensions_mut().remove::<ErrorDocument>() {
        Some(ErrorDocument(body)) => body,
        None if response.status() == StatusCode::METHOD_NOT_ALLOWED => AppError::MethodNotAllowed.document(),
        None => return response,
    };
    body.insert("resource_url", path);
    let mut rendered = render_error(response.status(), &body);
    if let Some(allow) = response.headers().get(header::ALLOW) {
        rendered.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rendered
}
