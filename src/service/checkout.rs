//! Atomic order placement: order, line items and stock decrements in one transaction.

use crate::error::AppError;
use crate::models::{CheckoutInput, Order, ProductOrder};
use crate::service::{OrderService, ProductOrderService, StockService};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Timestamp format of `createdAt` when the client omits it.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CheckoutService;

impl CheckoutService {
    /// Place the order. Any failure rolls back every write made so far, so no
    /// partial order or stock decrement is ever visible.
    pub async fn place(pool: &SqlitePool, input: &CheckoutInput) -> Result<(Order, Vec<ProductOrder>), AppError> {
        if input.items.is_empty() {
            return Err(AppError::BadRequest("Order must contain at least one item".into()));
        }
        let mut seen = HashSet::new();
        for line in &input.items {
            if !seen.insert(line.product_id) {
                return Err(AppError::BadRequest(format!(
                    "Product {} appears more than once",
                    line.product_id
                )));
            }
        }
        let created_at = input
            .created_at
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format(CREATED_AT_FORMAT).to_string());

        // Write lock up front; concurrent checkouts wait on the busy timeout.
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

        let sql = "SELECT id FROM customer WHERE uuid = ?";
        tracing::debug!(sql = %sql, customer = %input.customer_id, "query");
        let customer: Option<i64> = sqlx::query_scalar(sql)
            .bind(&input.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
        if customer.is_none() {
            return Err(AppError::NotFound(format!(
                "Customer with id '{}' not found.",
                input.customer_id
            )));
        }

        let order = OrderService::insert(&mut *tx, &input.customer_id, &created_at).await?;
        let mut lines = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let sql = "SELECT id FROM product WHERE id = ?";
            tracing::debug!(sql = %sql, product_id = line.product_id, "query");
            let product: Option<i64> = sqlx::query_scalar(sql)
                .bind(line.product_id)
                .fetch_optional(&mut *tx)
                .await?;
            if product.is_none() {
                return Err(AppError::NotFound(format!("Product with ID {} not found", line.product_id)));
            }
            if !StockService::decrement(&mut *tx, line.product_id, line.quantity).await? {
                return Err(match StockService::find(&mut *tx, line.product_id).await? {
                    None => AppError::NotFound(format!("No stock entry for product {}", line.product_id)),
                    Some(stock) => AppError::InsufficientStock(format!(
                        "Insufficient stock for product {}: requested {}, available {}",
                        line.product_id, line.quantity, stock.quantity
                    )),
                });
            }
            lines.push(ProductOrderService::insert(&mut *tx, order.id, line.product_id, line.quantity).await?);
        }

        tx.commit().await?;
        tracing::info!(order_id = order.id, lines = lines.len(), "checkout committed");
        Ok((order, lines))
    }
}
