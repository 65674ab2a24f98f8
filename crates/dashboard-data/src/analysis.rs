//! Main analysis pipeline for the sales dashboard.
//!
//! Loads the spreadsheet, computes the headline metrics and the three grouped
//! views, and returns a [`DashboardReport`] ready for the UI layer.

use std::path::Path;
use std::time::Instant;

use dashboard_core::error::Result;
use dashboard_core::models::{
    GroupTotal, MetricsSummary, MonthOrder, ProductSummary, ProductTotals, SalesTable,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::SalesAggregator;
use crate::loader::load_sales_table;
use crate::metrics::calculate_metrics;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisMetadata {
    /// Number of sales records loaded.
    pub records_loaded: usize,
    /// Distinct products, categories and months.
    pub products: usize,
    pub categories: usize,
    pub months: usize,
    /// Wall-clock seconds spent reading the workbook.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent computing metrics and groupings.
    pub aggregate_time_seconds: f64,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub table: SalesTable,
    pub metrics: MetricsSummary,
    /// Per-product breakdown, sorted by product name.
    pub products: Vec<ProductSummary>,
    /// TOTAL row for the breakdown table.
    pub product_totals: ProductTotals,
    /// Revenue per category.
    pub categories: Vec<GroupTotal>,
    /// Revenue per month, in the requested order.
    pub months: Vec<GroupTotal>,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline against the spreadsheet at `path`.
///
/// 1. Load and validate the table.
/// 2. Compute the headline metrics.
/// 3. Build the product, category and month views.
///
/// The first failing step aborts the run.
pub fn analyze_sales(path: &Path, month_order: MonthOrder) -> Result<DashboardReport> {
    let load_start = Instant::now();
    let table = load_sales_table(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let mut report = build_report(table, month_order)?;
    report.metadata.load_time_seconds = load_time;

    info!(
        "Analysed {} records: {} products, {} categories, {} months",
        report.metadata.records_loaded,
        report.metadata.products,
        report.metadata.categories,
        report.metadata.months
    );
    debug!(
        "Analysis metadata: {}",
        serde_json::to_string(&report.metadata).unwrap_or_default()
    );

    Ok(report)
}

/// Compute metrics and groupings for an already-loaded table.
pub fn build_report(table: SalesTable, month_order: MonthOrder) -> Result<DashboardReport> {
    let start = Instant::now();

    let metrics = calculate_metrics(&table)?;
    let products = SalesAggregator::by_product(&table);
    let product_totals = SalesAggregator::calculate_totals(&products);
    let categories = SalesAggregator::by_category(&table);
    let months = SalesAggregator::by_month_ordered(&table, month_order);

    debug!(
        "Metrics: {}",
        serde_json::to_string(&metrics).unwrap_or_default()
    );

    let metadata = AnalysisMetadata {
        records_loaded: table.len(),
        products: products.len(),
        categories: categories.len(),
        months: months.len(),
        load_time_seconds: 0.0,
        aggregate_time_seconds: start.elapsed().as_secs_f64(),
    };

    Ok(DashboardReport {
        table,
        metrics,
        products,
        product_totals,
        categories,
        months,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
