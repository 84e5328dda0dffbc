//! Storefront routes. Product reads go through [`CatalogService`], which answers
//! from the product cache whenever it is enabled.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    response::Response,
    routing::get,
};
use cellar_api_types::{CatalogListResponse, CatalogSource as ApiCatalogSource, ProductResponse};

use crate::application::catalog::{CatalogService, CatalogSource};
use crate::infra::db::SqliteRepositories;

use super::middleware::{log_responses, set_request_context};
use super::{ApiError, db_health_response, product_to_api};

const SOURCE: &str = "infra::http::public";

#[derive(Clone)]
pub struct PublicState {
    pub catalog: Arc<CatalogService>,
    pub db: Arc<SqliteRepositories>,
}

pub fn build_public_router(state: PublicState) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/_health/db", get(public_health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn list_products(
    State(state): State<PublicState>,
) -> Result<Json<CatalogListResponse>, ApiError> {
    let listing = state
        .catalog
        .list_products()
        .await
        .map_err(|err| ApiError::from(err).with_source(SOURCE))?;

    let source = match listing.source {
        CatalogSource::Cache => ApiCatalogSource::Cache,
        CatalogSource::Store => ApiCatalogSource::Store,
    };

    Ok(Json(CatalogListResponse {
        source,
        products: listing.products.into_iter().map(product_to_api).collect(),
    }))
}

async fn get_product(
    State(state): State<PublicState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .catalog
        .find_product(id)
        .await
        .map_err(|err| ApiError::from(err).with_source(SOURCE))?
        .ok_or_else(|| ApiError::not_found("product not found").with_source(SOURCE))?;

    Ok(Json(product_to_api(product)))
}

async fn public_health(State(state): State<PublicState>) -> Response {
    db_health_response(state.db.health_check().await)
}
