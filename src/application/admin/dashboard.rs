use std::sync::Arc;

use crate::application::repos::{DashboardCounts, DashboardRepo, RepoError};
use crate::domain::entities::OrderRecord;

const RECENT_ORDER_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub counts: DashboardCounts,
    pub recent_orders: Vec<OrderRecord>,
}

#[derive(Clone)]
pub struct AdminDashboardService {
    repo: Arc<dyn DashboardRepo>,
}

impl AdminDashboardService {
    pub fn new(repo: Arc<dyn DashboardRepo>) -> Self {
        Self { repo }
    }

    pub async fn overview(&self) -> Result<DashboardSummary, RepoError> {
        let (counts, recent_orders) = tokio::try_join!(
            self.repo.dashboard_counts(),
            self.repo.recent_orders(RECENT_ORDER_LIMIT),
        )?;

        Ok(DashboardSummary {
            counts,
            recent_orders,
        })
    }
}
