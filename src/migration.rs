//! Schema DDL. Creation is idempotent; foreign-key actions implement the delete rules.

use crate::error::AppError;
use sqlx::SqlitePool;

/// Tables in dependency order.
const TABLES: &[(&str, &str)] = &[
    (
        "customer",
        r#"
        CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT
        )
        "#,
    ),
    (
        "product",
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            price REAL NOT NULL
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id TEXT REFERENCES customer (uuid) ON DELETE SET NULL,
            created_at TEXT NOT NULL
        )
        "#,
    ),
    (
        "product_order",
        r#"
        CREATE TABLE IF NOT EXISTS product_order (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
            product_id INTEGER REFERENCES product (id) ON DELETE SET NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0)
        )
        "#,
    ),
    (
        "stock",
        r#"
        CREATE TABLE IF NOT EXISTS stock (
            product_id INTEGER PRIMARY KEY NOT NULL REFERENCES product (id) ON DELETE CASCADE,
            quantity INTEGER NOT NULL CHECK (quantity >= 0)
        )
        "#,
    ),
];

pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "create table");
        sqlx::query(ddl).execute(pool).await?;
    }
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_customer ON orders (customer_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_product_order_order ON product_order (order_id)")
        .execute(pool)
        .await?;
    tracing::info!(tables = TABLES.len(), "schema ready");
    Ok(())
}

/// Drop every table (reverse dependency order).
pub async fn drop_all(pool: &SqlitePool) -> Result<(), AppError> {
    for (name, _) in TABLES.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", name))
            .execute(pool)
            .await?;
    }
    tracing::info!("schema dropped");
    Ok(())
}
