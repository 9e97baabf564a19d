//! Resource routes mounted under `/api`. Item routes take one path segment, resolved by
//! [`crate::extractors::Found`].

use crate::handlers::{checkout, customer, meta, order, product, product_order, stock};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/link-relations/", get(meta::link_relations))
        .route(
            "/customers/",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/customers/:customer/",
            get(customer::read_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route("/customers/:customer/orders/", get(customer::customer_orders))
        .route("/orders/", get(order::list_orders).post(order::create_order))
        .route(
            "/orders/:order/",
            get(order::read_order).put(order::update_order).delete(order::delete_order),
        )
        .route("/checkout/", post(checkout::checkout))
        .route(
            "/productorders/",
            get(product_order::list_productorders).post(product_order::create_productorder),
        )
        .route(
            "/productorders/:productorder/",
            get(product_order::read_productorder)
                .put(product_order::update_productorder)
                .delete(product_order::delete_productorder),
        )
        .route("/products/", get(product::list_products).post(product::create_product))
        .route(
            "/products/:product/",
            get(product::read_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route("/products/:product/productorders/", get(product::product_productorders))
        .route("/stock/", get(stock::list_stock).post(stock::create_stock))
        .route(
            "/stock/:product/",
            get(stock::read_stock).put(stock::update_stock).delete(stock::delete_stock),
        )
        .with_state(state)
}

/// GET /profiles/{name}/
pub fn profile_routes() -> Router {
    Router::new().route("/profiles/:profile/", get(meta::profile))
}
