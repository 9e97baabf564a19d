//! Stock persistence. One row per product; quantity never goes below zero.

use crate::error::AppError;
use crate::models::{Stock, StockInput};
use crate::service::ProductService;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "product_id, quantity";

pub struct StockService;

impl StockService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Stock>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM stock ORDER BY product_id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Stock>(&sql).fetch_all(pool).await?)
    }

    pub async fn find<'e, E>(exec: E, product_id: i64) -> Result<Option<Stock>, AppError>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("SELECT {COLUMNS} FROM stock WHERE product_id = ?");
        tracing::debug!(sql = %sql, product_id, "query");
        Ok(sqlx::query_as::<_, Stock>(&sql)
            .bind(product_id)
            .fetch_optional(exec)
            .await?)
    }

    /// Product must exist (`NotFound`) and not have a stock row yet (`Conflict`).
    pub async fn create(pool: &SqlitePool, input: &StockInput) -> Result<Stock, AppError> {
        if ProductService::find(pool, input.product_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Product with ID {} not found",
                input.product_id
            )));
        }
        if Self::find(pool, input.product_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Stock for product {} already exists",
                input.product_id
            )));
        }
        let sql = format!("INSERT INTO stock (product_id, quantity) VALUES (?, ?) RETURNING {COLUMNS}");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Stock>(&sql)
            .bind(input.product_id)
            .bind(input.quantity)
            .fetch_one(pool)
            .await?)
    }

    /// Set the quantity. The body's `productId` must name this stock row's product.
    pub async fn update(pool: &SqlitePool, stock: &Stock, input: &StockInput) -> Result<Stock, AppError> {
        if input.product_id != stock.product_id {
            if ProductService::find(pool, input.product_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Product with ID {} not found",
                    input.product_id
                )));
            }
            return Err(AppError::BadRequest("Product ID cannot be modified".into()));
        }
        let sql = format!("UPDATE stock SET quantity = ? WHERE product_id = ? RETURNING {COLUMNS}");
        tracing::debug!(sql = %sql, product_id = stock.product_id, "query");
        Ok(sqlx::query_as::<_, Stock>(&sql)
            .bind(input.quantity)
            .bind(stock.product_id)
            .fetch_one(pool)
            .await?)
    }

    /// Conditional decrement. Returns `false` (nothing changed) when the row is
    /// missing or holds less than `quantity`.
    pub async fn decrement<'e, E>(exec: E, product_id: i64, quantity: i64) -> Result<bool, AppError>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = "UPDATE stock SET quantity = quantity - ? WHERE product_id = ? AND quantity >= ?";
        tracing::debug!(sql = %sql, product_id, quantity, "query");
        let done = sqlx::query(sql)
            .bind(quantity)
            .bind(product_id)
            .bind(quantity)
            .execute(exec)
            .await?;
        Ok(done.rows_affected() == 1)
    }

    pub async fn delete(pool: &SqlitePool, stock: &Stock) -> Result<(), AppError> {
        let sql = "DELETE FROM stock WHERE product_id = ?";
        tracing::debug!(sql = %sql, product_id = stock.product_id, "query");
        sqlx::query(sql)
            .bind(stock.product_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
