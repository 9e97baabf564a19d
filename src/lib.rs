//! Online store inventory: REST API over customers, orders, products, product orders
//! and stock, answering with Mason hypermedia documents.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod hrefs;
pub mod inventory;
pub mod mason;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use inventory::InventoryBuilder;
pub use mason::{Control, MasonBuilder};
pub use migration::{apply_migrations, drop_all};
pub use routes::build_router;
pub use state::AppState;
