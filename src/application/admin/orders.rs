use std::sync::Arc;

use crate::application::repos::{OrdersRepo, RepoError};
use crate::domain::entities::OrderRecord;

#[derive(Clone)]
pub struct AdminOrderService {
    repo: Arc<dyn OrdersRepo>,
}

impl AdminOrderService {
    pub fn new(repo: Arc<dyn OrdersRepo>) -> Self {
        Self { repo }
    }

    /// All orders newest first. A blank `status` means no filter; anything else must match exactly.
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<OrderRecord>, RepoError> {
        let status = status.map(str::trim).filter(|value| !value.is_empty());
        self.repo.list_orders(status).await
    }
}
