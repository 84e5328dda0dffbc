use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};
use time::PrimitiveDateTime;

use crate::{
    application::repos::{OrdersRepo, RepoError},
    domain::entities::OrderRecord,
};

use super::{SqliteRepositories, map_sqlx_error};

/// Orders joined with customer and product names. Callers append filters after `WHERE 1=1`.
pub(super) const ORDER_SELECT: &str = "SELECT o.id, o.customer_id, c.name AS customer_name, \
    o.product_id, p.name AS product_name, o.quantity, o.total_price, \
    COALESCE(o.status, 'Pending') AS status, o.order_date \
    FROM orders o \
    INNER JOIN customers c ON c.id = o.customer_id \
    INNER JOIN products p ON p.id = o.product_id \
    WHERE 1=1 ";

/// Null dates sort after every dated row under `DESC`.
pub(super) const ORDER_NEWEST_FIRST: &str = " ORDER BY o.order_date DESC, o.id DESC";

#[derive(sqlx::FromRow)]
pub(super) struct OrderRow {
    id: i64,
    customer_id: i64,
    customer_name: String,
    product_id: i64,
    product_name: String,
    quantity: i64,
    total_price: f64,
    status: String,
    // UTC text without an offset; NULL when the row was written with an explicit null.
    order_date: Option<PrimitiveDateTime>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            total_price: row.total_price,
            status: row.status,
            order_date: row.order_date.map(PrimitiveDateTime::assume_utc),
        }
    }
}

#[async_trait]
impl OrdersRepo for SqliteRepositories {
    async fn list_orders(&self, status: Option<&str>) -> Result<Vec<OrderRecord>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(ORDER_SELECT);

        if let Some(status) = status {
            qb.push(" AND COALESCE(o.status, 'Pending') = ");
            qb.push_bind(status.to_owned());
        }

        qb.push(ORDER_NEWEST_FIRST);

        let rows = qb
            .build_query_as::<OrderRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }

    async fn list_orders_for_customer(
        &self,
        customer_id: i64,
    ) -> Result<Vec<OrderRecord>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(ORDER_SELECT);
        qb.push(" AND o.customer_id = ");
        qb.push_bind(customer_id);
        qb.push(ORDER_NEWEST_FIRST);

        let rows = qb
            .build_query_as::<OrderRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(OrderRecord::from).collect())
    }
}
