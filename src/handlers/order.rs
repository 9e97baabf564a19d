//! Order collection and item resources.

use crate::error::AppError;
use crate::extractors::{Found, JsonDocument};
use crate::handlers::customer::order_items;
use crate::handlers::product_order::line_items;
use crate::hrefs;
use crate::inventory::InventoryBuilder;
use crate::mason::{LINK_RELATIONS_URL, ORDER_PROFILE};
use crate::models::{Order, OrderInput, ORDER_SCHEMA};
use crate::response::{created, mason_ok, no_content};
use crate::service::{CustomerService, OrderService, ProductOrderService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, response::Response};

pub async fn list_orders(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::order_collection());
    body.add_control_all_orders();
    body.add_control_add_order();
    body.add_control_checkout();

    let orders = OrderService::list(&state.pool).await?;
    body.insert_items("orders", &order_items(&orders)?)?;
    mason_ok(&body)
}

pub async fn create_order(
    State(state): State<AppState>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: OrderInput = RequestValidator::parse(doc, &ORDER_SCHEMA)?;
    let order = OrderService::create(&state.pool, &input).await?;
    tracing::info!(order_id = order.id, customer = %input.customer_id, "order created");
    Ok(created(hrefs::order_item(order.id)))
}

pub async fn read_order(State(state): State<AppState>, Found(order): Found<Order>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::from_item(&order)?;
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::order_item(order.id));
    body.add_link("profile", ORDER_PROFILE);
    body.add_link("collection", hrefs::order_collection());
    if let Some(uuid) = &order.customer_id {
        if CustomerService::find_by_uuid(&state.pool, uuid).await?.is_some() {
            body.add_control_customer_to_order(uuid);
        }
    }
    body.add_control_edit_order(&order);
    body.add_control_delete_order(&order);

    let lines = ProductOrderService::list_for_order(&state.pool, order.id).await?;
    body.insert_items("productorders", &line_items(&lines)?)?;
    mason_ok(&body)
}

pub async fn update_order(
    State(state): State<AppState>,
    Found(order): Found<Order>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: OrderInput = RequestValidator::parse(doc, &ORDER_SCHEMA)?;
    OrderService::update(&state.pool, &order, &input).await?;
    Ok(no_content())
}

pub async fn delete_order(State(state): State<AppState>, Found(order): Found<Order>) -> Result<Response, AppError> {
    OrderService::delete(&state.pool, &order).await?;
    tracing::info!(order_id = order.id, "order deleted");
    Ok(no_content())
}
