use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Exact header names the input spreadsheet must carry, in validation order.
pub const COLUMN_PRODUCT: &str = "Produto";
pub const COLUMN_CATEGORY: &str = "Categoria";
pub const COLUMN_MONTH: &str = "Mes";
pub const COLUMN_UNITS: &str = "Vendas";
pub const COLUMN_UNIT_PRICE: &str = "Preco_Unitario";

/// All required columns, checked in this order by the loader.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COLUMN_PRODUCT,
    COLUMN_CATEGORY,
    COLUMN_MONTH,
    COLUMN_UNITS,
    COLUMN_UNIT_PRICE,
];

/// A single sales row read from the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product: String,
    pub category: String,
    /// Month label exactly as it appears in the sheet (categorical).
    pub month: String,
    /// Units sold; never negative.
    pub units_sold: f64,
    /// Price per unit; never negative.
    pub unit_price: f64,
    /// Derived at construction: `units_sold * unit_price`.
    pub revenue: f64,
}

impl SalesRecord {
    /// Build a record and derive its revenue.
    pub fn new(
        product: impl Into<String>,
        category: impl Into<String>,
        month: impl Into<String>,
        units_sold: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            product: product.into(),
            category: category.into(),
            month: month.into(),
            units_sold,
            unit_price,
            revenue: units_sold * unit_price,
        }
    }
}

/// The whole dataset, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    /// File the table was loaded from.
    pub source: PathBuf,
    /// Worksheet the rows came from.
    pub sheet: String,
    /// Records in sheet row order.
    pub records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn new(source: impl Into<PathBuf>, sheet: impl Into<String>, records: Vec<SalesRecord>) -> Self {
        Self {
            source: source.into(),
            sheet: sheet.into(),
            records,
        }
    }

    /// Build an in-memory table with no backing file.
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }
}

/// Headline figures shown in the dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_units: f64,
    pub total_revenue: f64,
    /// Total revenue divided by total units (the "ticket médio").
    pub average_revenue_per_unit: f64,
    /// Product with the largest summed units.
    pub top_product: String,
}

/// One row of the per-product breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product: String,
    /// Summed units, rounded to 2 decimals.
    pub units_sold: f64,
    /// Summed revenue, rounded to 2 decimals.
    pub revenue: f64,
    /// Mean unit price over the product's rows, rounded to 2 decimals.
    pub average_unit_price: f64,
    /// `revenue / units_sold` rounded to 2 decimals; `None` when no units were sold.
    pub average_revenue_per_unit: Option<f64>,
    /// Share of total revenue in percent, rounded to 1 decimal; `None` when
    /// total revenue is zero.
    pub revenue_share_percent: Option<f64>,
}

/// Column totals for the product table's TOTAL row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductTotals {
    pub units_sold: f64,
    pub revenue: f64,
    pub products_count: usize,
    /// Sum of the rounded per-product shares, which may drift from 100 by a
    /// few tenths; `None` when no product has a share.
    pub revenue_share_percent: Option<f64>,
}

/// A single `(key, summed value)` pair from a grouped view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

impl GroupTotal {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Sort key for a grouping column.
///
/// Labels that read as finite numbers order numerically and come before text
/// labels, which order lexicographically.  This is the order a spreadsheet
/// column of numbers (`Mes = 1..12`) is expected to group in.  Equality is
/// plain label equality, so `"1"` and `"1.0"` remain separate groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey<'a>(pub &'a str);

impl<'a> GroupKey<'a> {
    /// The label as a finite number, if it is one.
    pub fn numeric(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl Ord for GroupKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(other.0),
        }
    }
}

impl PartialOrd for GroupKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How the monthly revenue view is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthOrder {
    /// Ascending order of the month labels as grouped.
    #[default]
    Grouped,
    /// Calendar order where the label can be recognised as a month.
    Calendar,
}

impl MonthOrder {
    /// Parse a CLI value.  Unknown names fall back to [`MonthOrder::Grouped`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "calendar" => Self::Calendar,
            _ => Self::Grouped,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
