use crate::service::validation::{Field, FieldType, Schema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInput {
    pub product_id: i64,
    pub quantity: i64,
}

pub static STOCK_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("productId", FieldType::Integer).required(),
        Field::new("quantity", FieldType::Integer).required().minimum(0),
    ],
};
