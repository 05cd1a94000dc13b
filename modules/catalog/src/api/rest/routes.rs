use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use super::handlers;
use crate::domain::service::CatalogService;

pub const API_PREFIX: &str = "/api/v1";

/// Catalog routes, mounted under [`API_PREFIX`].
#[must_use]
pub fn router(service: Arc<CatalogService>) -> Router {
    let routes = Router::new()
        .route(
            "/currencies",
            get(handlers::list_currencies).post(handlers::create_currency),
        )
        .route(
            "/currencies/{code}",
            get(handlers::get_currency)
                .put(handlers::update_currency)
                .delete(handlers::delete_currency),
        )
        .route(
            "/account-types",
            get(handlers::list_account_types).post(handlers::create_account_type),
        )
        .route("/account-types/{code}", get(handlers::get_account_type))
        .layer(Extension(service));

    Router::new().nest(API_PREFIX, routes)
}
