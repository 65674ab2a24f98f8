//! Data layer for the sales dashboard.
//!
//! Responsible for reading the sales spreadsheet, validating its columns,
//! computing the headline metrics and grouping revenue by product, category
//! and month.

pub mod aggregator;
pub mod analysis;
pub mod loader;
pub mod metrics;

pub use dashboard_core as core;
