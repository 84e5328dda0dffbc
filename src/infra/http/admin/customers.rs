use axum::{
    Json,
    extract::{Path, Query, State},
};
use cellar_api_types::{CustomerDetailResponse, CustomerListResponse, CustomerResponse};
use serde::Deserialize;

use crate::domain::entities::CustomerRecord;
use crate::infra::http::ApiError;

use super::{AdminState, orders::order_to_api};

const SOURCE: &str = "infra::http::admin::customers";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct CustomerListQuery {
    search: Option<String>,
}

fn customer_to_api(record: CustomerRecord) -> CustomerResponse {
    CustomerResponse {
        id: record.id,
        name: record.name,
        email: record.email,
        phone: record.phone,
        address: record.address,
        joined_at: record.joined_at,
    }
}

pub(super) async fn admin_customers(
    State(state): State<AdminState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<CustomerListResponse>, ApiError> {
    let customers = state
        .customers
        .list(query.search.as_deref())
        .await
        .map_err(|err| ApiError::from(err).with_source(SOURCE))?;

    Ok(Json(CustomerListResponse {
        customers: customers.into_iter().map(customer_to_api).collect(),
    }))
}

pub(super) async fn admin_customer_detail(
    State(state): State<AdminState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDetailResponse>, ApiError> {
    let detail = state
        .customers
        .detail(id)
        .await
        .map_err(|err| ApiError::from(err).with_source(SOURCE))?;

    Ok(Json(CustomerDetailResponse {
        customer: customer_to_api(detail.customer),
        orders: detail.orders.into_iter().map(order_to_api).collect(),
    }))
}
