use crate::service::validation::{Field, FieldType, Schema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Customer uuid; `None` once the customer has been deleted.
    pub customer_id: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub customer_id: String,
    pub created_at: String,
}

pub static ORDER_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("customerId", FieldType::String).required(),
        Field::new("createdAt", FieldType::String).required(),
    ],
};

/// One line of an atomic checkout.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// Order plus its line items, placed in a single transaction.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub customer_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub items: Vec<CheckoutLine>,
}

static CHECKOUT_LINE_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("productId", FieldType::Integer).required(),
        Field::new("quantity", FieldType::Integer).required().minimum(1),
    ],
};

pub static CHECKOUT_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("customerId", FieldType::String).required(),
        Field::new("createdAt", FieldType::String),
        Field::new("items", FieldType::Array(&CHECKOUT_LINE_SCHEMA)).required(),
    ],
};
