use crate::service::validation::{Field, FieldType, Schema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product. Items are addressed by `name`; `id` is exposed so clients can
/// reference the product in product orders and stock.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub desc: String,
    pub price: f64,
}

pub static PRODUCT_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("name", FieldType::String).required(),
        Field::new("desc", FieldType::String).required(),
        Field::new("price", FieldType::Number).required(),
    ],
};
