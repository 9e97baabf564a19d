//! Customer collection and item resources.

use crate::error::AppError;
use crate::extractors::{Found, JsonDocument};
use crate::hrefs;
use crate::inventory::InventoryBuilder;
use crate::mason::{CUSTOMER_PROFILE, LINK_RELATIONS_URL, ORDER_PROFILE};
use crate::models::{Customer, CustomerInput, Order, CUSTOMER_SCHEMA};
use crate::response::{created, mason_ok, no_content};
use crate::service::{CustomerService, OrderService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, response::Response};

pub(crate) fn order_items(orders: &[Order]) -> Result<Vec<InventoryBuilder>, AppError> {
    let mut items = Vec::with_capacity(orders.len());
    for order in orders {
        let mut item = InventoryBuilder::from_item(order)?;
        item.add_link("self", hrefs::order_item(order.id));
        item.add_link("profile", ORDER_PROFILE);
        items.push(item);
    }
    Ok(items)
}

pub async fn list_customers(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::customer_collection());
    body.add_control_all_customers();
    body.add_control_add_customer();

    let mut items = Vec::new();
    for customer in CustomerService::list(&state.pool).await? {
        let mut item = InventoryBuilder::from_item(&customer)?;
        item.add_link("self", hrefs::customer_item(&customer.uuid));
        item.add_link("profile", CUSTOMER_PROFILE);
        items.push(item);
    }
    body.insert_items("customers", &items)?;
    mason_ok(&body)
}

pub async fn create_customer(
    State(state): State<AppState>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: CustomerInput = RequestValidator::parse(doc, &CUSTOMER_SCHEMA)?;
    let customer = CustomerService::create(&state.pool, &input).await?;
    tracing::info!(uuid = %customer.uuid, "customer created");
    Ok(created(hrefs::customer_item(&customer.uuid)))
}

pub async fn read_customer(
    State(state): State<AppState>,
    Found(customer): Found<Customer>,
) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::from_item(&customer)?;
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::customer_item(&customer.uuid));
    body.add_link("profile", CUSTOMER_PROFILE);
    body.add_link("collection", hrefs::customer_collection());
    body.add_control_customer_orders(&customer);
    body.add_control_edit_customer(&customer);
    body.add_control_delete_customer(&customer);

    let orders = OrderService::list_for_customer(&state.pool, &customer.uuid).await?;
    body.insert_items("orders", &order_items(&orders)?)?;
    mason_ok(&body)
}

pub async fn update_customer(
    State(state): State<AppState>,
    Found(customer): Found<Customer>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: CustomerInput = RequestValidator::parse(doc, &CUSTOMER_SCHEMA)?;
    CustomerService::update(&state.pool, &customer, &input).await?;
    Ok(no_content())
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Found(customer): Found<Customer>,
) -> Result<Response, AppError> {
    CustomerService::delete(&state.pool, &customer).await?;
    tracing::info!(uuid = %customer.uuid, "customer deleted");
    Ok(no_content())
}

/// Orders placed by one customer.
pub async fn customer_orders(
    State(state): State<AppState>,
    Found(customer): Found<Customer>,
) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::customer_orders(&customer.uuid));
    body.add_link("up", hrefs::customer_item(&customer.uuid));
    body.add_control_all_orders();
    body.add_control_checkout();

    let orders = OrderService::list_for_customer(&state.pool, &customer.uuid).await?;
    body.insert_items("orders", &order_items(&orders)?)?;
    mason_ok(&body)
}
