//! Product order (line item) collection and item resources.

use crate::error::AppError;
use crate::extractors::{Found, JsonDocument};
use crate::hrefs;
use crate::inventory::InventoryBuilder;
use crate::mason::{LINK_RELATIONS_URL, PRODUCTORDER_PROFILE};
use crate::models::{ProductOrder, ProductOrderInput, PRODUCTORDER_SCHEMA};
use crate::response::{created, mason_ok, no_content};
use crate::service::{ProductOrderService, ProductService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, response::Response};

pub(crate) fn line_items(lines: &[ProductOrder]) -> Result<Vec<InventoryBuilder>, AppError> {
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let mut item = InventoryBuilder::from_item(line)?;
        item.add_link("self", hrefs::productorder_item(line.id));
        item.add_link("profile", PRODUCTORDER_PROFILE);
        items.push(item);
    }
    Ok(items)
}

pub async fn list_productorders(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::productorder_collection());
    body.add_control_all_productorders();
    body.add_control_add_productorder();

    let lines = ProductOrderService::list(&state.pool).await?;
    body.insert_items("productorders", &line_items(&lines)?)?;
    mason_ok(&body)
}

pub async fn create_productorder(
    State(state): State<AppState>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: ProductOrderInput = RequestValidator::parse(doc, &PRODUCTORDER_SCHEMA)?;
    let line = ProductOrderService::create(&state.pool, &input).await?;
    tracing::info!(id = line.id, order_id = line.order_id, "product order created");
    Ok(created(hrefs::productorder_item(line.id)))
}

pub async fn read_productorder(
    State(state): State<AppState>,
    Found(line): Found<ProductOrder>,
) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::from_item(&line)?;
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::productorder_item(line.id));
    body.add_link("profile", PRODUCTORDER_PROFILE);
    body.add_link("collection", hrefs::productorder_collection());
    body.add_control_edit_productorder(&line);
    body.add_control_delete_productorder(&line);
    body.add_control_order(line.order_id);
    if let Some(product_id) = line.product_id {
        if let Some(product) = ProductService::find(&state.pool, product_id).await? {
            body.add_control_product(&product);
        }
    }
    mason_ok(&body)
}

pub async fn update_productorder(
    State(state): State<AppState>,
    Found(line): Found<ProductOrder>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: ProductOrderInput = RequestValidator::parse(doc, &PRODUCTORDER_SCHEMA)?;
    ProductOrderService::update(&state.pool, &line, &input).await?;
    Ok(no_content())
}

pub async fn delete_productorder(
    State(state): State<AppState>,
    Found(line): Found<ProductOrder>,
) -> Result<Response, AppError> {
    ProductOrderService::delete(&state.pool, &line).await?;
    Ok(no_content())
}
