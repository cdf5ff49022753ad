//! Product scoring, ranking and recommendation service.
//!
//! Products are loaded into a [`services::ProductCatalog`], each one scored
//! once on creation (see [`services::scoring`]). The catalog answers filter,
//! ranking and statistics queries, and [`services::recommend`] combines them
//! into a single recommendation. The [`api`] module exposes all of it over
//! HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
