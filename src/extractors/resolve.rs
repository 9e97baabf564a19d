//! Path segment → stored row resolution. An unknown segment is a 404 before the handler runs.

use crate::error::AppError;
use crate::models::{Customer, Order, Product, ProductOrder, Stock};
use crate::service::{CustomerService, OrderService, ProductOrderService, ProductService, StockService};
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use sqlx::SqlitePool;

/// A row addressable by a single URL path segment.
#[async_trait]
pub trait Resolve: Sized {
    /// Human-readable kind used in not-found messages.
    const KIND: &'static str;

    async fn resolve(pool: &SqlitePool, segment: &str) -> Result<Option<Self>, AppError>;
}

/// Extractor for the row named by the route's only path parameter.
#[derive(Clone, Debug)]
pub struct Found<T>(pub T);

#[async_trait]
impl<T> FromRequestParts<AppState> for Found<T>
where
    T: Resolve + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(format!("{} not found", T::KIND)))?;
        T::resolve(&state.pool, &segment)
            .await?
            .map(Found)
            .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", T::KIND, segment)))
    }
}

#[async_trait]
impl Resolve for Customer {
    const KIND: &'static str = "Customer";

    async fn resolve(pool: &SqlitePool, segment: &str) -> Result<Option<Self>, AppError> {
        CustomerService::find_by_uuid(pool, segment).await
    }
}

#[async_trait]
impl Resolve for Order {
    const KIND: &'static str = "Order";

    async fn resolve(pool: &SqlitePool, segment: &str) -> Result<Option<Self>, AppError> {
        match segment.parse::<i64>() {
            Ok(id) => OrderService::find(pool, id).await,
            Err(_) => Ok(None),
        }
    }
}

#[async_trait]
impl Resolve for ProductOrder {
    const KIND: &'static str = "Product order";

    async fn resolve(pool: &SqlitePool, segment: &str) -> Result<Option<Self>, AppError> {
        match segment.parse::<i64>() {
            Ok(id) => ProductOrderService::find(pool, id).await,
            Err(_) => Ok(None),
        }
    }
}

#[async_trait]
impl Resolve for Product {
    const KIND: &'static str = "Product";

    async fn resolve(pool: &SqlitePool, segment: &str) -> Result<Option<Self>, AppError> {
        ProductService::find_by_name(pool, segment).await
    }
}

#[async_trait]
impl Resolve for Stock {
    const KIND: &'static str = "Stock";

    async fn resolve(pool: &SqlitePool, segment: &str) -> Result<Option<Self>, AppError> {
        match segment.parse::<i64>() {
            Ok(product_id) => StockService::find(pool, product_id).await,
            Err(_) => Ok(None),
        }
    }
}
