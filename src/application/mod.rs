//! Application services layer.

pub mod admin;
pub mod catalog;
pub mod error;
pub mod repos;
