//! Product persistence.

use crate::error::AppError;
use crate::models::{Product, ProductInput};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, price";

pub struct ProductService;

impl ProductService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?)
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product WHERE id = ?");
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Product>(&sql).bind(id).fetch_optional(pool).await?)
    }

    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM product WHERE name = ?");
        tracing::debug!(sql = %sql, name = %name, "query");
        Ok(sqlx::query_as::<_, Product>(&sql).bind(name).fetch_optional(pool).await?)
    }

    pub async fn create(pool: &SqlitePool, input: &ProductInput) -> Result<Product, AppError> {
        if Self::find_by_name(pool, &input.name).await?.is_some() {
            return Err(name_taken(&input.name));
        }
        let sql = format!("INSERT INTO product (name, description, price) VALUES (?, ?, ?) RETURNING {COLUMNS}");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(&input.desc)
            .bind(input.price)
            .fetch_one(pool)
            .await?)
    }

    /// Renaming onto another product's name is a conflict.
    pub async fn update(pool: &SqlitePool, product: &Product, input: &ProductInput) -> Result<Product, AppError> {
        if let Some(other) = Self::find_by_name(pool, &input.name).await? {
            if other.id != product.id {
                return Err(name_taken(&input.name));
            }
        }
        let sql = format!("UPDATE product SET name = ?, description = ?, price = ? WHERE id = ? RETURNING {COLUMNS}");
        tracing::debug!(sql = %sql, id = product.id, "query");
        Ok(sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(&input.desc)
            .bind(input.price)
            .bind(product.id)
            .fetch_one(pool)
            .await?)
    }

    /// Stock goes with the product; product orders keep a null product reference.
    pub async fn delete(pool: &SqlitePool, product: &Product) -> Result<(), AppError> {
        let sql = "DELETE FROM product WHERE id = ?";
        tracing::debug!(sql = %sql, id = product.id, "query");
        sqlx::query(sql)
            .bind(product.id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("Product with name '{}' already exists.", name))
}
