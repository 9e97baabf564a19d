//! Connection pool setup and demo data.

use crate::config::Settings;
use crate::error::AppError;
use crate::models::{CustomerInput, ProductInput, StockInput};
use crate::service::{CustomerService, OrderService, ProductOrderService, ProductService, StockService, CREATED_AT_FORMAT};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits for the database lock before giving up with SQLITE_BUSY.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Open the pool from settings, creating the database file if needed. Foreign keys are
/// enforced; WAL lets readers run while a checkout holds the write lock.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    tracing::info!(url = %settings.database_url, "database connected");
    Ok(pool)
}

/// Private in-memory database on a single long-lived connection (each SQLite
/// in-memory connection is its own database).
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

fn customer(first: &str, last: &str, email: &str, phone: &str) -> CustomerInput {
    CustomerInput {
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone: Some(phone.into()),
    }
}

/// Demo data: three customers, two products with stock, one order with two lines.
pub async fn populate(pool: &SqlitePool) -> Result<(), AppError> {
    let antti = CustomerService::create(pool, &customer("Antti", "Heikkinen", "a.heikkinen@luukku.com", "0441234569")).await?;
    CustomerService::create(pool, &customer("Pekka", "Pakkala", "pekka.pakkala@gmail.com", "0441254561")).await?;
    CustomerService::create(pool, &customer("Jukka", "Junnila", "jukka.junnila@hotmail.com", "0501234567")).await?;

    let umbrella = ProductService::create(
        pool,
        &ProductInput {
            name: "Sateenvarjo".into(),
            desc: "Sateenvarjo suojaa sinua sateelta kuin sateelta!".into(),
            price: 20.0,
        },
    )
    .await?;
    let boots = ProductService::create(
        pool,
        &ProductInput {
            name: "Kumpparit".into(),
            desc: "Kumiset saappaat, pitävät varpaasi kuivana!".into(),
            price: 10.0,
        },
    )
    .await?;

    let created_at = chrono::Local::now().format(CREATED_AT_FORMAT).to_string();
    let order = OrderService::insert(pool, &antti.uuid, &created_at).await?;
    ProductOrderService::insert(pool, order.id, umbrella.id, 2).await?;
    ProductOrderService::insert(pool, order.id, boots.id, 1).await?;

    StockService::create(pool, &StockInput { product_id: umbrella.id, quantity: 8 }).await?;
    StockService::create(pool, &StockInput { product_id: boots.id, quantity: 20 }).await?;
    tracing::info!("demo data inserted");
    Ok(())
}
