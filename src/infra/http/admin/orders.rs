use axum::{
    Json,
    extract::{Query, State},
};
use cellar_api_types::{OrderListResponse, OrderResponse};
use serde::Deserialize;

use crate::domain::entities::OrderRecord;
use crate::infra::http::ApiError;

use super::AdminState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct OrderListQuery {
    status: Option<String>,
}

pub(super) fn order_to_api(record: OrderRecord) -> OrderResponse {
    OrderResponse {
        id: record.id,
        customer_id: record.customer_id,
        customer_name: record.customer_name,
        product_id: record.product_id,
        product_name: record.product_name,
        quantity: record.quantity,
        total_price: record.total_price,
        status: record.status,
        order_date: record.order_date,
    }
}

pub(super) async fn admin_orders(
    State(state): State<AdminState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, ApiError> {
    let orders = state
        .orders
        .list(query.status.as_deref())
        .await
        .map_err(|err| ApiError::from(err).with_source("infra::http::admin::orders"))?;

    Ok(Json(OrderListResponse {
        orders: orders.into_iter().map(order_to_api).collect(),
    }))
}
