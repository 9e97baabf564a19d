//! Customer persistence.

use crate::error::AppError;
use crate::models::{Customer, CustomerInput};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, uuid, first_name, last_name, email, phone";

pub struct CustomerService;

impl CustomerService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Customer>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM customer ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?)
    }

    pub async fn find_by_uuid(pool: &SqlitePool, uuid: &str) -> Result<Option<Customer>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM customer WHERE uuid = ?");
        tracing::debug!(sql = %sql, uuid = %uuid, "query");
        Ok(sqlx::query_as::<_, Customer>(&sql)
            .bind(uuid)
            .fetch_optional(pool)
            .await?)
    }

    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Customer>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM customer WHERE email = ?");
        tracing::debug!(sql = %sql, email = %email, "query");
        Ok(sqlx::query_as::<_, Customer>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?)
    }

    /// Insert a customer under a freshly generated v4 uuid. Fails with `Conflict` if the email is taken.
    pub async fn create(pool: &SqlitePool, input: &CustomerInput) -> Result<Customer, AppError> {
        if Self::find_by_email(pool, &input.email).await?.is_some() {
            return Err(email_taken(&input.email));
        }
        let uuid = uuid::Uuid::new_v4().to_string();
        let sql = format!(
            "INSERT INTO customer (uuid, first_name, last_name, email, phone) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Customer>(&sql)
            .bind(&uuid)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await?)
    }

    /// Replace all writable fields. The email may stay the same but not collide with another customer.
    pub async fn update(pool: &SqlitePool, customer: &Customer, input: &CustomerInput) -> Result<Customer, AppError> {
        if let Some(other) = Self::find_by_email(pool, &input.email).await? {
            if other.id != customer.id {
                return Err(email_taken(&input.email));
            }
        }
        let sql = format!(
            "UPDATE customer SET first_name = ?, last_name = ?, email = ?, phone = ? WHERE id = ? RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id = customer.id, "query");
        Ok(sqlx::query_as::<_, Customer>(&sql)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(customer.id)
            .fetch_one(pool)
            .await?)
    }

    /// Orders of the customer survive with a null customer reference.
    pub async fn delete(pool: &SqlitePool, customer: &Customer) -> Result<(), AppError> {
        let sql = "DELETE FROM customer WHERE id = ?";
        tracing::debug!(sql = %sql, id = customer.id, "query");
        sqlx::query(sql)
            .bind(customer.id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

fn email_taken(email: &str) -> AppError {
    AppError::Conflict(format!("Customer with email '{}' already exists.", email))
}
