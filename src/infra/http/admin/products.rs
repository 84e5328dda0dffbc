use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use cellar_api_types::{ProductListResponse, ProductResponse, ProductWriteRequest};

use crate::domain::products::ProductDraft;
use crate::infra::http::{ApiError, product_to_api};

use super::{ADMIN_ACTOR, AdminState};

const SOURCE: &str = "infra::http::admin::products";

fn draft_from_request(request: ProductWriteRequest) -> ProductDraft {
    ProductDraft {
        name: request.name,
        wine_type: request.wine_type,
        region: request.region,
        vintage: request.vintage,
        price: request.price,
        alcohol: request.alcohol,
        stock: request.stock,
        description: request.description,
        image_url: request.image_url,
    }
}

fn api_error(err: impl Into<ApiError>) -> ApiError {
    err.into().with_source(SOURCE)
}

pub(super) async fn admin_products(
    State(state): State<AdminState>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.products.list().await.map_err(api_error)?;

    Ok(Json(ProductListResponse {
        products: products.into_iter().map(product_to_api).collect(),
    }))
}

pub(super) async fn admin_product_detail(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.find(id).await.map_err(api_error)?;
    Ok(Json(product_to_api(product)))
}

pub(super) async fn admin_product_create(
    State(state): State<AdminState>,
    payload: Result<Json<ProductWriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(request) = payload.map_err(api_error)?;
    let product = state
        .products
        .create(ADMIN_ACTOR, draft_from_request(request))
        .await
        .map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(product_to_api(product))))
}

pub(super) async fn admin_product_update(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductWriteRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Json(request) = payload.map_err(api_error)?;
    let product = state
        .products
        .update(ADMIN_ACTOR, id, draft_from_request(request))
        .await
        .map_err(api_error)?;

    Ok(Json(product_to_api(product)))
}

pub(super) async fn admin_product_delete(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .products
        .delete(ADMIN_ACTOR, id)
        .await
        .map_err(api_error)?;

    Ok(StatusCode::NO_CONTENT)
}
