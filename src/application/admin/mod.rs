//! Application services for the administrative surface.

pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
