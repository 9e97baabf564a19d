//! Product collection and item resources.

use crate::error::AppError;
use crate::extractors::{Found, JsonDocument};
use crate::handlers::product_order::line_items;
use crate::hrefs;
use crate::inventory::InventoryBuilder;
use crate::mason::{LINK_RELATIONS_URL, PRODUCT_PROFILE};
use crate::models::{Product, ProductInput, PRODUCT_SCHEMA};
use crate::response::{created, mason_ok, no_content};
use crate::service::{ProductOrderService, ProductService, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, response::Response};

pub async fn list_products(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::product_collection());
    body.add_control_all_products();
    body.add_control_add_product();

    let mut items = Vec::new();
    for product in ProductService::list(&state.pool).await? {
        let mut item = InventoryBuilder::from_item(&product)?;
        item.add_link("self", hrefs::product_item(&product.name));
        item.add_link("profile", PRODUCT_PROFILE);
        items.push(item);
    }
    body.insert_items("products", &items)?;
    mason_ok(&body)
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: ProductInput = RequestValidator::parse(doc, &PRODUCT_SCHEMA)?;
    let product = ProductService::create(&state.pool, &input).await?;
    tracing::info!(id = product.id, name = %product.name, "product created");
    Ok(created(hrefs::product_item(&product.name)))
}

pub async fn read_product(Found(product): Found<Product>) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::from_item(&product)?;
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::product_item(&product.name));
    body.add_link("profile", PRODUCT_PROFILE);
    body.add_link("collection", hrefs::product_collection());
    body.add_control_get_productorders(&product);
    body.add_control_get_stock(&product);
    body.add_control_edit_product(&product);
    body.add_control_delete_product(&product);
    mason_ok(&body)
}

pub async fn update_product(
    State(state): State<AppState>,
    Found(product): Found<Product>,
    JsonDocument(doc): JsonDocument,
) -> Result<Response, AppError> {
    let input: ProductInput = RequestValidator::parse(doc, &PRODUCT_SCHEMA)?;
    ProductService::update(&state.pool, &product, &input).await?;
    Ok(no_content())
}

pub async fn delete_product(
    State(state): State<AppState>,
    Found(product): Found<Product>,
) -> Result<Response, AppError> {
    ProductService::delete(&state.pool, &product).await?;
    tracing::info!(id = product.id, name = %product.name, "product deleted");
    Ok(no_content())
}

/// Line items that reference the product.
pub async fn product_productorders(
    State(state): State<AppState>,
    Found(product): Found<Product>,
) -> Result<Response, AppError> {
    let mut body = InventoryBuilder::new();
    body.add_namespace("store", LINK_RELATIONS_URL);
    body.add_link("self", hrefs::product_productorders(&product.name));
    body.add_link("up", hrefs::product_item(&product.name));
    body.add_control_all_productorders();

    let lines = ProductOrderService::list_for_product(&state.pool, product.id).await?;
    body.insert_items("productorders", &line_items(&lines)?)?;
    mason_ok(&body)
}
