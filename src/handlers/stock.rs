//! Stock collection and item resources.

use crate::error::AppError;
use crate::extractors::{Found, JsonDocument};
use crate::hrefs;
use crate::inventory::InventoryBuilder;
use crate::mason::{LINK_RELATIONS_URL, STOCK_PROFILE};
use crate::models::{Stock, StockInput, STOCK_SCHEMA};
use crate::response::{created, mason_ok, no_content};
use crate::service::{ProductService, RequestValidator, StockService};
use crate::state::AppState;
use axum::{extract::State, response::Response};

pub async fn list_stock(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::stock_collection());
    body.add_control_all_stock();
    body.add_control_add_stock();

    let mut items = Vec::new();
    for stock in StockService::list(&state.pool).await? {
        let mut item = InventoryBuilder::from_item(&stock)?;
        item.add_link("self", hrefs::stock_item(stock.product_id));
        item.add_link("profile", STOCK_PROFILE);
        items.push(item);
    }
    body.insert_items("items", &items)?;
    mason_ok(&body)
}

pub async fn create_stock(
    State(state): State<AppState>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: StockInput = RequestValidator::parse(doc, &STOCK_SCHEMA)?;
    let stock = StockService::create(&state.pool, &input).await?;
    tracing::info!(product_id = stock.product_id, quantity = stock.quantity, "stock created");
    Ok(created(hrefs::stock_item(stock.product_id)))
}

pub async fn read_stock(State(state): State<AppState>, Found(stock): Found<Stock>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::from_item(&stock)?;
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::stock_item(stock.product_id));
    body.add_link("profile", STOCK_PROFILE);
    body.add_link("collection", hrefs::stock_collection());
    if let Some(product) = ProductService::find(&state.pool, stock.product_id).await? {
        body.add_control_get_product(&product);
    }
    body.add_control_edit_stock(&stock);
    body.add_control_delete_stock(&stock);
    mason_ok(&body)
}

pub async fn update_stock(
    State(state): State<AppState>,
    Found(stock): Found<Stock>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: StockInput = RequestValidator::parse(doc, &STOCK_SCHEMA)?;
    let updated = StockService::update(&state.pool, &stock, &input).await?;
    tracing::info!(product_id = updated.product_id, quantity = updated.quantity, "stock updated");
    Ok(no_content())
}

pub async fn delete_stock(State(state): State<AppState>, Found(stock): Found<Stock>) -> Result<Response, AppError> {
    StockService::delete(&state.pool, &stock).await?;
    Ok(no_content())
}
