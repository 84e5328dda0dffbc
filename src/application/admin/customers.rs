use std::sync::Arc;

use thiserror::Error;

use crate::application::repos::{CustomersRepo, OrdersRepo, RepoError};
use crate::domain::entities::{CustomerRecord, OrderRecord};

#[derive(Debug, Error)]
pub enum AdminCustomerError {
    #[error("customer {id} not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A customer together with every order they placed, newest first.
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: CustomerRecord,
    pub orders: Vec<OrderRecord>,
}

#[derive(Clone)]
pub struct AdminCustomerService {
    customers: Arc<dyn CustomersRepo>,
    orders: Arc<dyn OrdersRepo>,
}

impl AdminCustomerService {
    pub fn new(customers: Arc<dyn CustomersRepo>, orders: Arc<dyn OrdersRepo>) -> Self {
        Self { customers, orders }
    }

    /// Lists customers, narrowed to name or email substring matches when `search` is not blank.
    pub async fn list(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<CustomerRecord>, AdminCustomerError> {
        let search = search.map(str::trim).filter(|term| !term.is_empty());
        self.customers
            .list_customers(search)
            .await
            .map_err(AdminCustomerError::from)
    }

    pub async fn detail(&self, id: i64) -> Result<CustomerDetail, AdminCustomerError> {
        let customer = self
            .customers
            .find_customer(id)
            .await?
            .ok_or(AdminCustomerError::NotFound { id })?;
        let orders = self.orders.list_orders_for_customer(id).await?;

        Ok(CustomerDetail { customer, orders })
    }
}
