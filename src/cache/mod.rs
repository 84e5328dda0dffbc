//! Cellar product cache.
//!
//! A process-local mirror of the `products` table that backs the storefront
//! catalog. [`CacheLoader`] fills a [`ProductCache`] once at startup; admin
//! writes go straight to the database and are not reflected here until the
//! process restarts.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enable_product_cache = true
//! ```

mod config;
mod loader;
mod lock;
mod store;

pub use self::config::CacheConfig;
pub use loader::{CacheLoadError, CacheLoader};
pub use store::ProductCache;

pub(crate) use loader::METRIC_CACHE_LOAD_MS;
pub(crate) use store::{METRIC_CACHE_ENTRIES, METRIC_CACHE_HIT_TOTAL, METRIC_CACHE_MISS_TOTAL};
