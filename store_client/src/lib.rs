//! Client for the online store API. Every write follows a control taken from a
//! server response; only the collection entry points are known up front.

pub mod api;
pub mod document;
pub mod table;
pub mod workflow;

pub use api::{ApiClient, ApiError, Reply};
pub use document::{Control, Document};
pub use workflow::{place_order_atomic, place_order_stepwise, OrderLine};
