//! Request and response bodies exchanged with the Cellar admin and storefront routers.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Body accepted by the admin create and update product endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWriteRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub wine_type: String,
    pub region: String,
    pub vintage: i32,
    pub price: f64,
    pub alcohol: f64,
    pub stock: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub wine_type: String,
    pub region: String,
    pub vintage: i32,
    pub price: f64,
    pub alcohol: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Where a storefront listing was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Cache,
    Store,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogListResponse {
    pub source: CatalogSource,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub total_products: u64,
    pub total_customers: u64,
    pub total_orders: u64,
    pub pending_orders: u64,
}

/// An order with its customer and product names resolved.
///
/// `order_date` is `null` for orders stored without a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: f64,
    pub status: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub order_date: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub joined_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetailResponse {
    pub customer: CustomerResponse,
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStatsResponse,
    pub recent_orders: Vec<OrderResponse>,
}
