//! Per-product breakdown table.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per product
//! plus a highlighted totals row pinned to the bottom.  When there are more
//! products than fit, the visible window starts at a caller-supplied offset.

use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use dashboard_core::formatting::{format_currency, format_percent, format_quantity};
use dashboard_core::models::{ProductSummary, ProductTotals};

use crate::components::fit_width;
use crate::themes::Theme;

/// Column headings, left to right.
pub const HEADERS: [&str; 6] = [
    "Product",
    "Units",
    "Revenue",
    "Avg Price",
    "Avg Rev/Unit",
    "Share %",
];

const PRODUCT_COLUMN_WIDTH: u16 = 24;

/// Rows of chrome around the data rows: two borders, header and totals.
const CHROME_ROWS: u16 = 4;

/// Number of product rows visible in an area of `height` rows.
pub fn visible_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS) as usize
}

/// Largest useful scroll offset for `total` rows in an area of `height` rows.
pub fn max_offset(total: usize, height: u16) -> usize {
    total.saturating_sub(visible_rows(height))
}

/// Render the product table into `area`, starting at product row `offset`.
pub fn render_product_table(
    frame: &mut Frame,
    area: Rect,
    products: &[ProductSummary],
    totals: &ProductTotals,
    offset: usize,
    theme: &Theme,
) {
    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let offset = offset.min(max_offset(products.len(), area.height));
    let visible = visible_rows(area.height);

    let mut rows: Vec<Row> = products
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from(fit_width(&p.product, PRODUCT_COLUMN_WIDTH as usize)),
                Cell::from(format_quantity(p.units_sold)),
                Cell::from(format_currency(p.revenue)),
                Cell::from(format_currency(p.average_unit_price)),
                Cell::from(
                    p.average_revenue_per_unit
                        .map(format_currency)
                        .unwrap_or_else(|| "n/a".to_string()),
                ),
                Cell::from(format_percent(p.revenue_share_percent)),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from(format!("TOTAL ({} products)", totals.products_count)),
            Cell::from(format_quantity(totals.units_sold)),
            Cell::from(format_currency(totals.revenue)),
            Cell::from(""),
            Cell::from(""),
            Cell::from(format_percent(totals.revenue_share_percent)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(PRODUCT_COLUMN_WIDTH),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(9),
    ];

    let title = if products.len() > visible {
        format!(
            " Product Breakdown ({}-{} of {}) ",
            offset + 1,
            (offset + visible).min(products.len()),
            products.len()
        )
    } else {
        " Product Breakdown ".to_string()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(title, theme.panel_title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
