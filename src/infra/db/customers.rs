use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};
use time::PrimitiveDateTime;

use crate::{
    application::repos::{CustomersRepo, RepoError},
    domain::entities::CustomerRecord,
};

use super::{SqliteRepositories, map_sqlx_error};

// `password` stays in the table.
const CUSTOMER_COLUMNS: &str = "id, name, email, phone, address, joined_at";

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    joined_at: Option<PrimitiveDateTime>,
}

impl From<CustomerRow> for CustomerRecord {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            joined_at: row.joined_at.map(PrimitiveDateTime::assume_utc),
        }
    }
}

#[async_trait]
impl CustomersRepo for SqliteRepositories {
    async fn list_customers(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<CustomerRecord>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE 1=1 "
        ));

        if let Some(search) = search {
            let pattern = format!("%{search}%");
            qb.push(" AND (name LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR email LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(" ORDER BY joined_at DESC, id DESC");

        let rows = qb
            .build_query_as::<CustomerRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CustomerRecord::from).collect())
    }

    async fn find_customer(&self, id: i64) -> Result<Option<CustomerRecord>, RepoError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(CustomerRecord::from))
    }
}
