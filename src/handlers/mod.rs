//! HTTP handlers, one module per resource.

pub mod checkout;
pub mod customer;
pub mod meta;
pub mod order;
pub mod product;
pub mod product_order;
pub mod stock;
