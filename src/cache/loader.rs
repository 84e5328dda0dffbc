//! Bulk resynchronization of the product cache from the database.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use metrics::histogram;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::application::repos::{ProductsRepo, RepoError};
use crate::domain::entities::ProductRecord;

use super::store::ProductCache;

pub(crate) const METRIC_CACHE_LOAD_MS: &str = "cellar_catalog_cache_load_ms";

#[derive(Debug, Error)]
pub enum CacheLoadError {
    #[error("failed to read products from the store: {0}")]
    Store(#[from] RepoError),
}

/// Rebuilds a [`ProductCache`] from every row of the `products` table.
///
/// A load is a total replace: the new mapping is built off to the side and
/// swapped in only after the read succeeds, so a failed load leaves the
/// previous contents in place.
pub struct CacheLoader {
    source: Arc<dyn ProductsRepo>,
    cache: Arc<ProductCache>,
}

impl CacheLoader {
    pub fn new(source: Arc<dyn ProductsRepo>, cache: Arc<ProductCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<ProductCache> {
        &self.cache
    }

    /// Returns the number of products now cached.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, CacheLoadError> {
        let started_at = Instant::now();

        let rows = self.source.list_all_products().await.map_err(|err| {
            warn!(
                target = "cellar::cache_loader",
                error = %err,
                "product read failed; cache left untouched"
            );
            CacheLoadError::from(err)
        })?;

        let entries: HashMap<i64, ProductRecord> =
            rows.into_iter().map(|product| (product.id, product)).collect();
        let loaded = entries.len();
        let replaced = self.cache.replace_all(entries);

        let elapsed_ms = started_at.elapsed().as_secs_f64() * 1000.0;
        histogram!(METRIC_CACHE_LOAD_MS).record(elapsed_ms);

        info!(
            target = "cellar::cache_loader",
            loaded,
            replaced,
            elapsed_ms,
            "product cache loaded"
        );

        Ok(loaded)
    }
}
