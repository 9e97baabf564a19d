use crate::service::validation::{Field, FieldType, Schema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A line item: `quantity` units of a product within an order.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrder {
    pub id: i64,
    pub order_id: i64,
    /// `None` once the product has been deleted.
    pub product_id: Option<i64>,
    pub quantity: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrderInput {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

pub static PRODUCTORDER_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("orderId", FieldType::Integer).required(),
        Field::new("productId", FieldType::Integer).required(),
        Field::new("quantity", FieldType::Integer).required().minimum(1),
    ],
};
