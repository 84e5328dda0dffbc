use axum::{Json, extract::State};
use cellar_api_types::{DashboardResponse, DashboardStatsResponse};

use crate::infra::http::ApiError;

use super::{AdminState, orders::order_to_api};

pub(super) async fn admin_dashboard(
    State(state): State<AdminState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let summary = state
        .dashboard
        .overview()
        .await
        .map_err(|err| ApiError::from(err).with_source("infra::http::admin::dashboard"))?;

    let stats = DashboardStatsResponse {
        total_products: summary.counts.total_products,
        total_customers: summary.counts.total_customers,
        total_orders: summary.counts.total_orders,
        pending_orders: summary.counts.pending_orders,
    };
    let recent_orders = summary.recent_orders.into_iter().map(order_to_api).collect();

    Ok(Json(DashboardResponse {
        stats,
        recent_orders,
    }))
}
