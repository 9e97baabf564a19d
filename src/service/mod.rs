//! Per-entity persistence services plus request validation.

mod checkout;
mod customers;
mod orders;
mod product_orders;
mod products;
mod stock;
pub mod validation;

pub use checkout::{CheckoutService, CREATED_AT_FORMAT};
pub use customers::CustomerService;
pub use orders::OrderService;
pub use product_orders::ProductOrderService;
pub use products::ProductService;
pub use stock::StockService;
pub use validation::RequestValidator;
