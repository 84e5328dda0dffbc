//! Product cache configuration.

/// Product cache switches, resolved from `[cache]` in `cellar.toml`.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Serve the storefront catalog from the in-process product cache.
    ///
    /// When off, no startup load happens and storefront reads go to the database.
    pub enable_product_cache: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_product_cache: true,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enable_product_cache: settings.enable_product_cache,
        }
    }
}

impl CacheConfig {
    pub fn is_enabled(&self) -> bool {
        self.enable_product_cache
    }
}
