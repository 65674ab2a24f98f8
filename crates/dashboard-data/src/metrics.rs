//! Headline metrics over a [`SalesTable`].

use std::collections::BTreeMap;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{GroupKey, MetricsSummary, SalesTable};

/// Compute the dashboard summary figures.
///
/// Fails with [`DashboardError::DivisionByZero`] when the table sells no
/// units at all (which includes the empty table).
pub fn calculate_metrics(table: &SalesTable) -> Result<MetricsSummary> {
    let total_units: f64 = table.iter().map(|r| r.units_sold).sum();
    let total_revenue: f64 = table.iter().map(|r| r.revenue).sum();

    if total_units == 0.0 {
        return Err(DashboardError::DivisionByZero);
    }

    Ok(MetricsSummary {
        total_units,
        total_revenue,
        average_revenue_per_unit: total_revenue / total_units,
        top_product: top_product(table).unwrap_or_default(),
    })
}

/// Product with the largest summed units.
///
/// Products are visited in ascending [`GroupKey`] order and only a strictly
/// larger total replaces the current leader, so ties go to the first key.
pub fn top_product(table: &SalesTable) -> Option<String> {
    let mut units_by_product: BTreeMap<GroupKey, f64> = BTreeMap::new();
    for record in table.iter() {
        *units_by_product.entry(GroupKey(&record.product)).or_default() += record.units_sold;
    }

    let mut best: Option<(GroupKey, f64)> = None;
    for (product, units) in units_by_product {
        match best {
            Some((_, best_units)) if units <= best_units => {}
            _ => best = Some((product, units)),
        }
    }
    best.map(|(product, _)| product.as_str().to_string())
}
