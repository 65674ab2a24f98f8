//! Shared building blocks for the sales dashboard.
//!
//! Holds the domain models (records, tables, summaries), the error type,
//! number and currency formatting, and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
