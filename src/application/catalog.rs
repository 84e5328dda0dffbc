//! Storefront catalog reads.
//!
//! With the product cache enabled, every storefront read is answered from the
//! cache alone: a miss is a definitive "not found" and never falls through to
//! the database. Admin surfaces use [`crate::application::admin`] services and
//! always see the live table, so the two views drift apart after any admin write
//! until the process restarts.

use std::sync::Arc;

use thiserror::Error;

use crate::application::repos::{ProductsRepo, RepoError};
use crate::cache::ProductCache;
use crate::domain::entities::ProductRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Cache,
    Store,
}

#[derive(Debug, Clone)]
pub struct CatalogListing {
    pub source: CatalogSource,
    pub products: Vec<ProductRecord>,
}

#[derive(Clone)]
pub struct CatalogService {
    cache: Option<Arc<ProductCache>>,
    store: Arc<dyn ProductsRepo>,
}

impl CatalogService {
    /// `cache` is `None` when the product cache is disabled; reads then go to `store`.
    pub fn new(cache: Option<Arc<ProductCache>>, store: Arc<dyn ProductsRepo>) -> Self {
        Self { cache, store }
    }

    pub fn source(&self) -> CatalogSource {
        if self.cache.is_some() {
            CatalogSource::Cache
        } else {
            CatalogSource::Store
        }
    }

    /// All products ordered by id.
    pub async fn list_products(&self) -> Result<CatalogListing, CatalogError> {
        let mut products = match &self.cache {
            Some(cache) => cache.get_all(),
            None => self.store.list_all_products().await?,
        };
        products.sort_by_key(|product| product.id);

        Ok(CatalogListing {
            source: self.source(),
            products,
        })
    }

    pub async fn find_product(&self, id: i64) -> Result<Option<ProductRecord>, CatalogError> {
        match &self.cache {
            Some(cache) => Ok(cache.get(id)),
            None => self.store.find_product(id).await.map_err(CatalogError::from),
        }
    }
}
