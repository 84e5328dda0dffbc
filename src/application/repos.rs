//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{CustomerRecord, OrderRecord, ProductRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateProductParams {
    pub name: String,
    pub wine_type: String,
    pub region: String,
    pub vintage: i32,
    pub price: f64,
    pub alcohol: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProductParams {
    pub id: i64,
    pub name: String,
    pub wine_type: String,
    pub region: String,
    pub vintage: i32,
    pub price: f64,
    pub alcohol: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_products: u64,
    pub total_customers: u64,
    pub total_orders: u64,
    pub pending_orders: u64,
}

#[async_trait]
pub trait ProductsRepo: Send + Sync {
    /// Every product row, in no particular order. Used for bulk cache loads.
    async fn list_all_products(&self) -> Result<Vec<ProductRecord>, RepoError>;

    /// Every product row, most recently created first.
    async fn list_products_newest_first(&self) -> Result<Vec<ProductRecord>, RepoError>;

    async fn find_product(&self, id: i64) -> Result<Option<ProductRecord>, RepoError>;
}

#[async_trait]
pub trait ProductsWriteRepo: Send + Sync {
    async fn create_product(&self, params: CreateProductParams)
    -> Result<ProductRecord, RepoError>;

    async fn update_product(&self, params: UpdateProductParams)
    -> Result<ProductRecord, RepoError>;

    async fn delete_product(&self, id: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait DashboardRepo: Send + Sync {
    async fn dashboard_counts(&self) -> Result<DashboardCounts, RepoError>;

    /// The latest orders, newest first. Undated orders sort last.
    async fn recent_orders(&self, limit: u32) -> Result<Vec<OrderRecord>, RepoError>;
}

#[async_trait]
pub trait CustomersRepo: Send + Sync {
    /// Customers whose name or email contains `search`, newest joiners first.
    /// `None` lists everyone.
    async fn list_customers(&self, search: Option<&str>)
    -> Result<Vec<CustomerRecord>, RepoError>;

    async fn find_customer(&self, id: i64) -> Result<Option<CustomerRecord>, RepoError>;
}

#[async_trait]
pub trait OrdersRepo: Send + Sync {
    /// Orders newest first, optionally restricted to one status.
    async fn list_orders(&self, status: Option<&str>) -> Result<Vec<OrderRecord>, RepoError>;

    async fn list_orders_for_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<OrderRecord>, RepoError>;
}
