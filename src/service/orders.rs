//! Order persistence.

use crate::error::AppError;
use crate::models::{Order, OrderInput};
use crate::service::CustomerService;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, customer_id, created_at";

pub struct OrderService;

impl OrderService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Order>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM orders ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Order>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?");
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Order>(&sql).bind(id).fetch_optional(pool).await?)
    }

    pub async fn list_for_customer(pool: &SqlitePool, customer_uuid: &str) -> Result<Vec<Order>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM orders WHERE customer_id = ? ORDER BY id");
        tracing::debug!(sql = %sql, customer = %customer_uuid, "query");
        Ok(sqlx::query_as::<_, Order>(&sql)
            .bind(customer_uuid)
            .fetch_all(pool)
            .await?)
    }

    /// Insert without checking the customer; callers resolve it first.
    pub async fn insert<'e, E>(exec: E, customer_uuid: &str, created_at: &str) -> Result<Order, AppError>
    where
        E: SqliteExecutor<'e>,
    {
        let sql = format!("INSERT INTO orders (customer_id, created_at) VALUES (?, ?) RETURNING {COLUMNS}");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Order>(&sql)
            .bind(customer_uuid)
            .bind(created_at)
            .fetch_one(exec)
            .await?)
    }

    pub async fn create(pool: &SqlitePool, input: &OrderInput) -> Result<Order, AppError> {
        ensure_customer(pool, &input.customer_id).await?;
        Self::insert(pool, &input.customer_id, &input.created_at).await
    }

    pub async fn update(pool: &SqlitePool, order: &Order, input: &OrderInput) -> Result<Order, AppError> {
        ensure_customer(pool, &input.customer_id).await?;
        let sql = format!("UPDATE orders SET customer_id = ?, created_at = ? WHERE id = ? RETURNING {COLUMNS}");
        tracing::debug!(sql = %sql, id = order.id, "query");
        Ok(sqlx::query_as::<_, Order>(&sql)
            .bind(&input.customer_id)
            .bind(&input.created_at)
            .bind(order.id)
            .fetch_one(pool)
            .await?)
    }

    /// Product orders of the order are removed with it.
    pub async fn delete(pool: &SqlitePool, order: &Order) -> Result<(), AppError> {
        let sql = "DELETE FROM orders WHERE id = ?";
        tracing::debug!(sql = %sql, id = order.id, "query");
        sqlx::query(sql)
            .bind(order.id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

async fn ensure_customer(pool: &SqlitePool, uuid: &str) -> Result<(), AppError> {
    match CustomerService::find_by_uuid(pool, uuid).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("Customer with id '{}' not found.", uuid))),
    }
}
