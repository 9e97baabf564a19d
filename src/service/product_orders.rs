//! Product order (line item) persistence.

use crate::error::AppError;
use crate::models::{ProductOrder, ProductOrderInput};
use crate::service::{OrderService, ProductService};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, order_id, product_id, quantity";

pub struct ProductOrderService;

impl ProductOrderService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<ProductOrder>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product_order ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, ProductOrder>(&sql).fetch_all(pool).await?)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<ProductOrder>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product_order WHERE id = ?");
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, ProductOrder>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?)
    }

    pub async fn list_for_order(pool: &SqlitePool, order_id: i64) -> Result<Vec<ProductOrder>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product_order WHERE order_id = ? ORDER BY id");
        tracing::debug!(sql = %sql, order_id, "query");
        Ok(sqlx::query_as::<_, ProductOrder>(&sql)
            .bind(order_id)
            .fetch_all(pool)
            .await?)
    }

    pub async fn list_for_product(pool: &SqlitePool, product_id: i64) -> Result<Vec<ProductOrder>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product_order WHERE product_id = ? ORDER BY id");
        tracing::debug!(sql = %sql, product_id, "query");
        Ok(sqlx::query_as::<_, ProductOrder>(&sql)
            .bind(product_id)
            .fetch_all(pool)
            .await?)
    }

    /// Insert without reference checks; callers resolve order and product first.
    pub async fn insert<'e, E>(exec: E, order_id: i64, product_id: i64, quantity: i64) -> Result<ProductOrder, AppError>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!(
            "INSERT INTO product_order (order_id, product_id, quantity) VALUES (?, ?, ?) RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, order_id, product_id, quantity, "query");
        Ok(sqlx::query_as::<_, ProductOrder>(&sql)
            .bind(order_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(exec)
            .await?)
    }

    pub async fn create(pool: &SqlitePool, input: &ProductOrderInput) -> Result<ProductOrder, AppError> {
        ensure_references(pool, input).await?;
        Self::insert(pool, input.order_id, input.product_id, input.quantity).await
    }

    pub async fn update(
        pool: &SqlitePool,
        line: &ProductOrder,
        input: &ProductOrderInput,
    ) -> Result<ProductOrder, AppError> {
        ensure_references(pool, input).await?;
        let sql = format!(
            "UPDATE product_order SET order_id = ?, product_id = ?, quantity = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id = line.id, "query");
        Ok(sqlx::query_as::<_, ProductOrder>(&sql)
            .bind(input.order_id)
            .bind(input.product_id)
            .bind(input.quantity)
            .bind(line.id)
            .fetch_one(pool)
            .await?)
    }

    pub async fn delete(pool: &SqlitePool, line: &ProductOrder) -> Result<(), AppError> {
        let sql = "DELETE FROM product_order WHERE id = ?";
        tracing::debug!(sql = %sql, id = line.id, "query");
        sqlx::query(sql)
            .bind(line.id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

async fn ensure_references(pool: &SqlitePool, input: &ProductOrderInput) -> Result<(), AppError> {
    if OrderService::find(pool, input.order_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Order with ID {} not found", input.order_id)));
    }
    if ProductService::find(pool, input.product_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Product with ID {} not found", input.product_id)));
    }
    Ok(())
}
