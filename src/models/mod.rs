//! Stored rows, their wire representation and the writable-document schemas.

mod customer;
mod order;
mod product;
mod product_order;
mod stock;

pub use customer::{Customer, CustomerInput, CUSTOMER_SCHEMA};
pub use order::{CheckoutInput, CheckoutLine, Order, OrderInput, CHECKOUT_SCHEMA, ORDER_SCHEMA};
pub use product::{Product, ProductInput, PRODUCT_SCHEMA};
pub use product_order::{ProductOrder, ProductOrderInput, PRODUCTORDER_SCHEMA};
pub use stock::{Stock, StockInput, STOCK_SCHEMA};
