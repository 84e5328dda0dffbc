//! Cellar Society catalog backend: storefront and admin HTTP services over a
//! SQLite product store, with a process-local product cache for the storefront.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
