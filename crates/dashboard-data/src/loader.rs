//! Spreadsheet loading for the sales dashboard.
//!
//! Opens the workbook with [`calamine`], validates the header row against
//! [`REQUIRED_COLUMNS`] and converts every data row into a [`SalesRecord`]
//! with its derived revenue.  Validation is pure: errors are returned to the
//! caller, never displayed from here.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::Timelike;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{
    SalesRecord, SalesTable, COLUMN_CATEGORY, COLUMN_MONTH, COLUMN_PRODUCT, COLUMN_UNITS,
    COLUMN_UNIT_PRICE, REQUIRED_COLUMNS,
};
use tracing::{debug, info};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the first worksheet of the workbook at `path` into a [`SalesTable`].
///
/// Fails with:
/// * [`DashboardError::NotFound`] when `path` is not an existing file.
/// * [`DashboardError::Workbook`] when the file cannot be parsed.
/// * [`DashboardError::EmptyWorkbook`] when the workbook has no sheets.
/// * [`DashboardError::Schema`] naming the first missing required column.
/// * [`DashboardError::InvalidCell`] when a row breaks a record invariant.
pub fn load_sales_table(path: &Path) -> Result<SalesTable> {
    if !path.is_file() {
        return Err(DashboardError::NotFound(path.to_path_buf()));
    }

    // The workbook (and its file handle) is dropped when this scope ends.
    let (sheet, range) = {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| DashboardError::Workbook(e.to_string()))?;

        let Some(sheet) = workbook.sheet_names().first().cloned() else {
            return Err(DashboardError::EmptyWorkbook(path.to_path_buf()));
        };
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| DashboardError::Workbook(e.to_string()))?;
        (sheet, range)
    };

    debug!(
        "Read sheet '{}' from {} ({} x {} cells)",
        sheet,
        path.display(),
        range.height(),
        range.width()
    );

    let records = parse_range(&range)?;
    info!("Loaded {} sales records from {}", records.len(), path.display());

    Ok(SalesTable::new(path, sheet, records))
}

/// Convert a worksheet range (header row first) into sales records.
pub fn parse_range(range: &Range<Data>) -> Result<Vec<SalesRecord>> {
    // 1-based sheet row number of the first row in the range.
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0) + 1;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);
    let columns = ColumnIndex::from_header(header)?;

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let sheet_row = first_row + offset + 1;
        records.push(columns.record_from_row(row, sheet_row)?);
    }

    Ok(records)
}

// ── Column lookup ─────────────────────────────────────────────────────────────

/// Positions of the required columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    product: usize,
    category: usize,
    month: usize,
    units: usize,
    unit_price: usize,
}

impl ColumnIndex {
    /// Locate every required column, failing on the first one that is absent.
    fn from_header(header: &[Data]) -> Result<Self> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            if let Data::String(name) = cell {
                positions.entry(name.clone()).or_insert(idx);
            }
        }

        for column in REQUIRED_COLUMNS {
            if !positions.contains_key(column) {
                return Err(DashboardError::Schema {
                    column: column.to_string(),
                });
            }
        }

        Ok(Self {
            product: positions[COLUMN_PRODUCT],
            category: positions[COLUMN_CATEGORY],
            month: positions[COLUMN_MONTH],
            units: positions[COLUMN_UNITS],
            unit_price: positions[COLUMN_UNIT_PRICE],
        })
    }

    fn record_from_row(&self, row: &[Data], sheet_row: usize) -> Result<SalesRecord> {
        let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);
        let invalid = |column: &str, reason: String| DashboardError::InvalidCell {
            row: sheet_row,
            column: column.to_string(),
            reason,
        };

        let product = required_text(cell(self.product)).map_err(|r| invalid(COLUMN_PRODUCT, r))?;
        let category =
            required_text(cell(self.category)).map_err(|r| invalid(COLUMN_CATEGORY, r))?;
        let month = cell_text(cell(self.month));
        let units = non_negative_number(cell(self.units)).map_err(|r| invalid(COLUMN_UNITS, r))?;
        let unit_price =
            non_negative_number(cell(self.unit_price)).map_err(|r| invalid(COLUMN_UNIT_PRICE, r))?;

        Ok(SalesRecord::new(product, category, month, units, unit_price))
    }
}

// ── Cell conversion ───────────────────────────────────────────────────────────

/// Render a cell as a label.  Whole floats drop their `.0`; dates become
/// `YYYY-MM-DD`, with the time appended when it is not midnight.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if naive.num_seconds_from_midnight() == 0 => {
                naive.format("%Y-%m-%d").to_string()
            }
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::Error(e) => format!("{:?}", e),
    }
}

fn required_text(cell: &Data) -> std::result::Result<String, String> {
    if let Data::Error(e) = cell {
        return Err(format!("cell contains an error value ({:?})", e));
    }
    let text = cell_text(cell);
    if text.is_empty() {
        return Err("value is missing".to_string());
    }
    Ok(text)
}

fn non_negative_number(cell: &Data) -> std::result::Result<f64, String> {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_number_text(s)
            .ok_or_else(|| format!("expected a number, found \"{}\"", s.trim()))?,
        Data::Empty => return Err("value is missing".to_string()),
        other => return Err(format!("expected a number, found {:?}", other)),
    };

    if !value.is_finite() {
        return Err(format!("expected a finite number, found {}", value));
    }
    if value < 0.0 {
        return Err(format!("must not be negative, found {}", value));
    }
    Ok(value)
}

/// Parse numeric text, accepting a decimal comma when no dot is present.
fn parse_number_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }
    if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        return trimmed.replace(',', ".").parse::<f64>().ok();
    }
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
