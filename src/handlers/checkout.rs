//! Atomic order placement.

use crate::error::AppError;
use crate::extractors::JsonDocument;
use crate::hrefs;
use crate::models::{CheckoutInput, CHECKOUT_SCHEMA};
use crate::response::created;
use crate::service::{CheckoutService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, response::Response};

pub async fn checkout(State(state): State<AppState>, JsonDocument(doc): JsonDocument) -> Result<Response, AppError> {
    let input: CheckoutInput = RequestValidator::parse(doc, &CHECKOUT_SCHEMA)?;
    let (order, _) = CheckoutService::place(&state.pool, &input).await?;
    Ok(created(hrefs::order_item(order.id)))
}
