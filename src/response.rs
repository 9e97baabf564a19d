//! Response helpers: Mason bodies, 201 with Location, 204.

use crate::error::AppError;
use crate::mason::MASON;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 200 with a Mason body.
pub fn mason_ok<T: Serialize>(body: &T) -> Result<Response, AppError> {
    mason(StatusCode::OK, body)
}

pub fn mason<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, AppError> {
    let bytes = serde_json::to_vec(body)?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(MASON))],
        bytes,
    )
        .into_response())
}

/// 201 with an empty body and the new resource's href in `Location`.
pub fn created(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
