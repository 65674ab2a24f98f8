use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sales dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The input spreadsheet does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A required column is absent from the header row.
    #[error("Column '{column}' not found in the spreadsheet")]
    Schema { column: String },

    /// Total units sold is zero, so the average revenue per unit is undefined.
    #[error("Cannot compute average revenue per unit: total units sold is zero")]
    DivisionByZero,

    /// The workbook has no worksheets at all.
    #[error("Workbook contains no sheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    /// The workbook could not be opened or a sheet could not be read.
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// A data cell violates the record invariants.
    #[error("Invalid value in row {row}, column '{column}': {reason}")]
    InvalidCell {
        row: usize,
        column: String,
        reason: String,
    },
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = DashboardError::NotFound(PathBuf::from("/data/vendas.xlsx"));
        assert_eq!(err.to_string(), "File not found: /data/vendas.xlsx");
    }

    #[test]
    fn test_error_display_schema_names_column() {
        let err = DashboardError::Schema {
            column: "Preco_Unitario".to_string(),
        };
        let msg = err.to_string();
        assert_eq!(msg, "Column 'Preco_Unitario' not found in the spreadsheet");
    }

    #[test]
    fn test_error_display_division_by_zero() {
        let msg = DashboardError::DivisionByZero.to_string();
        assert!(msg.contains("total units sold is zero"));
    }

    #[test]
    fn test_error_display_empty_workbook() {
        let err = DashboardError::EmptyWorkbook(PathBuf::from("/tmp/empty.xlsx"));
        assert_eq!(err.to_string(), "Workbook contains no sheets: /tmp/empty.xlsx");
    }

    #[test]
    fn test_error_display_invalid_cell() {
        let err = DashboardError::InvalidCell {
            row: 7,
            column: "Vendas".to_string(),
            reason: "expected a number, found \"abc\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid value in row 7, column 'Vendas'"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_error_is_thread_safe_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&DashboardError::DivisionByZero);
    }
}
