use crate::service::validation::{Field, FieldType, Schema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered customer. Addressed externally by `uuid`; `id` stays internal.
#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip)]
    pub id: i64,
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

pub static CUSTOMER_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("firstName", FieldType::String).required(),
        Field::new("lastName", FieldType::String).required(),
        Field::new("email", FieldType::String).required(),
        Field::new("phone", FieldType::String),
    ],
};
