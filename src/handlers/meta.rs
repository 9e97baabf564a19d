//! Link-relation namespace, profile documents and the operational status documents.

use crate::error::AppError;
use crate::mason::{MasonBuilder, PROFILES};
use crate::response::mason_ok;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};

pub async fn link_relations() -> &'static str {
    "Link relations of the online store API: product, customer, order, productorder and stock controls."
}

pub async fn profile(Path(name): Path<String>) -> Result<String, AppError> {
    if PROFILES.contains(&name.as_str()) {
        Ok(format!("Profile of the {} resource.", name))
    } else {
        Err(AppError::NotFound(format!("Profile '{}' not found", name)))
    }
}

/// Any path no route matches.
pub async fn unknown_route() -> AppError {
    AppError::NotFound("No resource at this URL".into())
}

fn status_document(href: &str) -> MasonBuilder {
    let mut body = MasonBuilder::new();
    body.insert("status", "ok");
    body.add_link("self", href);
    body
}

pub async fn health() -> Result<Response, AppError> {
    mason_ok(&status_document("/health"))
}

/// 503 while the database does not answer.
pub async fn ready(State(state): State<AppState>) -> Result<Response, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "database ping failed");
            AppError::Unavailable("Database unavailable".into())
        })?;
    let mut body = status_document("/ready");
    body.insert("database", "ok");
    mason_ok(&body)
}

pub async fn version() -> Result<Response, AppError> {
    let mut body = status_document("/version");
    body.insert("name", env!("CARGO_PKG_NAME"));
    body.insert("version", env!("CARGO_PKG_VERSION"));
    mason_ok(&body)
}
