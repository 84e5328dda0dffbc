//! Back-office routes. Everything here reads and writes the live store;
//! nothing refreshes the storefront product cache.

mod customers;
mod dashboard;
mod health;
mod orders;
mod products;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};

use crate::application::admin::{
    customers::AdminCustomerService, dashboard::AdminDashboardService, orders::AdminOrderService,
    products::AdminProductService,
};
use crate::infra::db::SqliteRepositories;

use super::middleware::{log_responses, set_request_context};

/// Actor label recorded on product mutations.
const ADMIN_ACTOR: &str = "admin";

#[derive(Clone)]
pub struct AdminState {
    pub db: Arc<SqliteRepositories>,
    pub products: Arc<AdminProductService>,
    pub dashboard: Arc<AdminDashboardService>,
    pub customers: Arc<AdminCustomerService>,
    pub orders: Arc<AdminOrderService>,
}

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard::admin_dashboard))
        .route(
            "/products",
            get(products::admin_products).post(products::admin_product_create),
        )
        .route(
            "/products/{id}",
            get(products::admin_product_detail)
                .put(products::admin_product_update)
                .delete(products::admin_product_delete),
        )
        .route("/customers", get(customers::admin_customers))
        .route("/customers/{id}", get(customers::admin_customer_detail))
        .route("/orders", get(orders::admin_orders))
        .route("/_health/db", get(health::admin_health))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}
