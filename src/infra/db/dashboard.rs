use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use crate::{
    application::repos::{DashboardCounts, DashboardRepo, RepoError},
    domain::entities::OrderRecord,
};

use super::{
    SqliteRepositories, map_sqlx_error,
    orders::{ORDER_NEWEST_FIRST, ORDER_SELECT, OrderRow},
};

#[derive(sqlx::FromRow)]
struct CountsRow {
    total_products: i64,
    total_customers: i64,
    total_orders: i64,
    pending_orders: i64,
}

#[async_trait]
impl DashboardRepo for SqliteRepositories {
    async fn dashboard_counts(&self) -> Result<DashboardCounts, RepoError> {
        let row = sqlx::query_as::<_, CountsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM customers) AS total_customers,
                (SELECT COUNT(*) FROM orders) AS total_orders,
                (SELECT COUNT(*) FROM orders WHERE COALESCE(status, 'Pending') = 'Pending') AS pending_orders
            "#,
        )
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(DashboardCounts {
            total_products: Self::convert_count(row.total_products)?,
            total_customers: Self::convert_count(row.total_customers)?,
            total_orders: Self::convert_count(row.total_orders)?,
            pending_orders: Self::convert_count(row.pending_orders)?,
        })
    }

    async fn recent_orders(&self, limit: u32) -> Result<Vec<OrderRecord>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(ORDER_SELECT);
        qb.push(ORDER_NEWEST_FIRST);
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(limit));

        let rows = qb
            .build_query_as::<OrderRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }
}
