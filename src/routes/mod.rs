//! Router assembly.

mod api;
mod common;

pub use api::{api_routes, profile_routes};
pub use common::common_routes;

use crate::error::attach_resource_url;
use crate::handlers::meta;
use crate::state::AppState;
use axum::{middleware, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// Full application: operational routes, `/api` resources and profiles.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .merge(profile_routes())
        .fallback(meta::unknown_route)
        .layer(middleware::from_fn(attach_resource_url))
        .layer(RequestBodyLimitLayer::new(body_limit))
}
