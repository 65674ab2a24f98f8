//! Grouped views over a [`SalesTable`]: per product, per category and per
//! month.
//!
//! Every grouping walks the table once and accumulates into a `BTreeMap`
//! keyed by [`GroupKey`], so groups come out in ascending key order: numeric
//! labels numerically, then text labels lexicographically.

use std::collections::BTreeMap;
use std::str::FromStr;

use dashboard_core::formatting::{percentage, round_to};
use dashboard_core::models::{
    GroupKey, GroupTotal, MonthOrder, ProductSummary, ProductTotals, SalesRecord, SalesTable,
};
use regex::Regex;

// ── ProductStats ──────────────────────────────────────────────────────────────

/// Running totals for one product group.
#[derive(Debug, Clone, Default)]
struct ProductStats {
    units_sold: f64,
    revenue: f64,
    unit_price_sum: f64,
    rows: u32,
}

impl ProductStats {
    fn add_record(&mut self, record: &SalesRecord) {
        self.units_sold += record.units_sold;
        self.revenue += record.revenue;
        self.unit_price_sum += record.unit_price;
        self.rows += 1;
    }

    fn mean_unit_price(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.unit_price_sum / f64::from(self.rows)
        }
    }
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups sales records.
pub struct SalesAggregator;

impl SalesAggregator {
    /// One [`ProductSummary`] per distinct product, sorted by product name.
    ///
    /// Units, revenue and mean unit price are rounded to 2 decimals first;
    /// the per-unit average (2 decimals) and revenue share (1 decimal) are
    /// then derived from those rounded figures.
    pub fn by_product(table: &SalesTable) -> Vec<ProductSummary> {
        let groups = Self::group_by(
            table,
            |r| r.product.as_str(),
            |stats: &mut ProductStats, r| stats.add_record(r),
        );

        let rounded: Vec<(String, f64, f64, f64)> = groups
            .into_iter()
            .map(|(product, stats)| {
                (
                    product.as_str().to_string(),
                    round_to(stats.units_sold, 2),
                    round_to(stats.revenue, 2),
                    round_to(stats.mean_unit_price(), 2),
                )
            })
            .collect();

        let total_revenue: f64 = rounded.iter().map(|(_, _, revenue, _)| revenue).sum();

        rounded
            .into_iter()
            .map(|(product, units_sold, revenue, average_unit_price)| {
                let average_revenue_per_unit = if units_sold == 0.0 {
                    None
                } else {
                    Some(round_to(revenue / units_sold, 2))
                };
                ProductSummary {
                    product,
                    units_sold,
                    revenue,
                    average_unit_price,
                    average_revenue_per_unit,
                    revenue_share_percent: percentage(revenue, total_revenue, 1),
                }
            })
            .collect()
    }

    /// Summed revenue per category.
    pub fn by_category(table: &SalesTable) -> Vec<GroupTotal> {
        Self::sum_revenue_by(table, |r| r.category.as_str())
    }

    /// Summed revenue per month label, in grouping (ascending key) order.
    ///
    /// Rows with a blank month belong to no group here, though they still
    /// count towards the product and category views.
    pub fn by_month(table: &SalesTable) -> Vec<GroupTotal> {
        let mut months = Self::sum_revenue_by(table, |r| r.month.as_str());
        months.retain(|g| !g.key.is_empty());
        months
    }

    /// [`Self::by_month`] followed by the requested ordering.
    pub fn by_month_ordered(table: &SalesTable, order: MonthOrder) -> Vec<GroupTotal> {
        let months = Self::by_month(table);
        match order {
            MonthOrder::Grouped => months,
            MonthOrder::Calendar => order_months_by_calendar(months),
        }
    }

    /// Sum the product rows into the TOTAL row of the breakdown table.
    pub fn calculate_totals(products: &[ProductSummary]) -> ProductTotals {
        let mut totals = ProductTotals::default();
        for product in products {
            totals.units_sold += product.units_sold;
            totals.revenue += product.revenue;
            totals.products_count += 1;
            if let Some(share) = product.revenue_share_percent {
                let sum = totals.revenue_share_percent.unwrap_or(0.0) + share;
                totals.revenue_share_percent = Some(round_to(sum, 1));
            }
        }
        totals
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn sum_revenue_by<'a>(
        table: &'a SalesTable,
        key_fn: impl Fn(&'a SalesRecord) -> &'a str,
    ) -> Vec<GroupTotal> {
        Self::group_by(table, key_fn, |sum: &mut f64, r| *sum += r.revenue)
            .into_iter()
            .map(|(key, value)| GroupTotal::new(key.as_str(), value))
            .collect()
    }

    /// Generic grouping driver.
    ///
    /// `key_fn` picks the grouping column; `fold` accumulates one record into
    /// its group's state.
    fn group_by<'a, A: Default>(
        table: &'a SalesTable,
        key_fn: impl Fn(&'a SalesRecord) -> &'a str,
        mut fold: impl FnMut(&mut A, &SalesRecord),
    ) -> BTreeMap<GroupKey<'a>, A> {
        let mut map: BTreeMap<GroupKey<'a>, A> = BTreeMap::new();
        for record in table.iter() {
            fold(map.entry(GroupKey(key_fn(record))).or_default(), record);
        }
        map
    }
}

// ── Calendar ordering ─────────────────────────────────────────────────────────

/// Portuguese month abbreviations and full names, January first.
const PT_MONTHS: [(&str, &str); 12] = [
    ("jan", "janeiro"),
    ("fev", "fevereiro"),
    ("mar", "março"),
    ("abr", "abril"),
    ("mai", "maio"),
    ("jun", "junho"),
    ("jul", "julho"),
    ("ago", "agosto"),
    ("set", "setembro"),
    ("out", "outubro"),
    ("nov", "novembro"),
    ("dez", "dezembro"),
];

/// Reorder month groups chronologically.
///
/// Labels that can be read as a month (`"2024-03"`, `"03/2024"`, `"3"`,
/// `"Mar"`, `"Março"`, `"March"`) are sorted by `(year, month)`; labels
/// without a year sort as year 0.  Unrecognised labels keep their relative
/// order and follow the recognised ones.
pub fn order_months_by_calendar(mut months: Vec<GroupTotal>) -> Vec<GroupTotal> {
    let parser = MonthParser::new();
    months.sort_by_cached_key(|g| {
        let rank = parser.rank(&g.key);
        (rank.is_none(), rank)
    });
    months
}

struct MonthParser {
    year_first: Regex,
    month_first: Regex,
}

impl MonthParser {
    fn new() -> Self {
        Self {
            year_first: Regex::new(r"^(\d{4})[-/](\d{1,2})(?:[-/]\d{1,2})?$").expect("regex is valid"),
            month_first: Regex::new(r"^(\d{1,2})[-/](\d{4})$").expect("regex is valid"),
        }
    }

    /// `(year, month)` for a recognisable label.
    fn rank(&self, label: &str) -> Option<(i32, u32)> {
        let label = label.trim();

        if let Some(caps) = self.year_first.captures(label) {
            return valid(caps[1].parse().ok()?, caps[2].parse().ok()?);
        }
        if let Some(caps) = self.month_first.captures(label) {
            return valid(caps[2].parse().ok()?, caps[1].parse().ok()?);
        }
        if let Ok(month) = label.parse::<u32>() {
            return valid(0, month);
        }

        let lower = label.trim_end_matches('.').to_lowercase();
        let lower = if lower == "marco" { "março".to_string() } else { lower };
        if let Some(idx) = PT_MONTHS
            .iter()
            .position(|(abbrev, full)| lower == *abbrev || lower == *full)
        {
            return Some((0, idx as u32 + 1));
        }

        chrono::Month::from_str(&lower)
            .ok()
            .map(|m| (0, m.number_from_month()))
    }
}

fn valid(year: i32, month: u32) -> Option<(i32, u32)> {
    (1..=12).contains(&month).then_some((year, month))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
