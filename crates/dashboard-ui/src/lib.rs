//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, the header, summary and error dialog components, the
//! product breakdown table, the chart grid, and the application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
