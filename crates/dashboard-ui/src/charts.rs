//! The 2×2 chart grid: units by product (bars), revenue share by category
//! (pie), monthly revenue (line) and one blank panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        canvas::{Canvas, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};

use dashboard_core::formatting::{format_currency, format_number, format_quantity};
use dashboard_core::models::{GroupTotal, ProductSummary};

use crate::components::fit_width;
use crate::themes::Theme;

/// Months beyond which only the first and last x-axis labels are drawn.
const MAX_MONTH_LABELS: usize = 12;

/// Inputs for the four chart panels.
pub struct ChartData<'a> {
    pub products: &'a [ProductSummary],
    pub categories: &'a [GroupTotal],
    pub months: &'a [GroupTotal],
}

/// Split `area` into a 2×2 grid and draw every panel.
pub fn render_chart_grid(frame: &mut Frame, area: Rect, data: &ChartData, theme: &Theme) {
    let [top, bottom] = Layout::vertical([Constraint::Percentage(50); 2]).areas(area);
    let [top_left, top_right] = Layout::horizontal([Constraint::Percentage(50); 2]).areas(top);
    let [bottom_left, bottom_right] =
        Layout::horizontal([Constraint::Percentage(50); 2]).areas(bottom);

    render_units_by_product(frame, top_left, data.products, theme);
    render_revenue_by_category(frame, top_right, data.categories, theme);
    render_monthly_revenue(frame, bottom_left, data.months, theme);
    render_blank_panel(frame, bottom_right, theme);
}

fn panel(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", title), theme.panel_title))
}

// ── Bar chart ─────────────────────────────────────────────────────────────────

/// Width of each bar so that `count` bars with 1-column gaps fill `inner_width`.
pub fn bar_width(inner_width: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let count = count as u16;
    let gaps = count.saturating_sub(1);
    (inner_width.saturating_sub(gaps) / count).clamp(1, 12)
}

pub fn render_units_by_product(
    frame: &mut Frame,
    area: Rect,
    products: &[ProductSummary],
    theme: &Theme,
) {
    let width = bar_width(area.width.saturating_sub(2), products.len());

    let bars: Vec<Bar> = products
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.units_sold.max(0.0).round() as u64)
                .text_value(format_quantity(p.units_sold))
                .label(Line::from(fit_width(&p.product, width as usize)))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Units Sold by Product", theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(1)
        .bar_style(theme.chart_bar)
        .value_style(theme.chart_bar_value)
        .label_style(theme.label);

    frame.render_widget(chart, area);
}

// ── Pie chart ─────────────────────────────────────────────────────────────────

/// One wedge of the category pie, in degrees counter-clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub percent: f64,
    pub start: f64,
    pub end: f64,
}

/// Turn group totals into consecutive wedges.  Non-positive totals get no
/// wedge; an all-zero input yields no slices.
pub fn pie_slices(groups: &[GroupTotal]) -> Vec<PieSlice> {
    let total: f64 = groups.iter().map(|g| g.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    groups
        .iter()
        .filter(|g| g.value > 0.0)
        .map(|g| {
            let fraction = g.value / total;
            let end = start + fraction * 360.0;
            let slice = PieSlice {
                label: g.key.clone(),
                percent: fraction * 100.0,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

/// Index of the slice covering `angle` degrees.
pub fn slice_at(slices: &[PieSlice], angle: f64) -> Option<usize> {
    if slices.is_empty() {
        return None;
    }
    let angle = angle.rem_euclid(360.0);
    slices
        .iter()
        .position(|s| angle < s.end)
        .or(Some(slices.len() - 1))
}

/// Sample the unit disc on a `resolution`×`resolution` grid and bucket each
/// point by slice.
pub fn pie_points(slices: &[PieSlice], resolution: usize) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); slices.len()];
    if slices.is_empty() || resolution < 2 {
        return buckets;
    }

    let step = 2.0 / (resolution - 1) as f64;
    for i in 0..resolution {
        let x = -1.0 + i as f64 * step;
        for j in 0..resolution {
            let y = -1.0 + j as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = y.atan2(x).to_degrees() - 90.0;
            if let Some(idx) = slice_at(slices, angle) {
                buckets[idx].push((x, y));
            }
        }
    }
    buckets
}

/// Canvas bounds that keep the pie round in a `width`×`height` cell area,
/// given terminal cells roughly twice as tall as they are wide.
pub fn canvas_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    if width == 0 || height == 0 {
        return ([-1.0, 1.0], [-1.0, 1.0]);
    }
    let aspect = f64::from(width) / (2.0 * f64::from(height));
    if aspect >= 1.0 {
        ([-aspect, aspect], [-1.0, 1.0])
    } else {
        ([-1.0, 1.0], [-1.0 / aspect, 1.0 / aspect])
    }
}

pub fn render_revenue_by_category(
    frame: &mut Frame,
    area: Rect,
    categories: &[GroupTotal],
    theme: &Theme,
) {
    let block = panel("Revenue by Category", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slices = pie_slices(categories);
    if slices.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No revenue to chart", theme.dim)),
            inner,
        );
        return;
    }

    let [pie_area, legend_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(inner);

    let points = pie_points(&slices, 120);
    let (x_bounds, y_bounds) = canvas_bounds(pie_area.width, pie_area.height);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (idx, coords) in points.iter().enumerate() {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: theme.slice_color(idx),
                });
            }
        });
    frame.render_widget(canvas, pie_area);

    let label_width = legend_area.width.saturating_sub(10) as usize;
    let legend: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(theme.slice_color(idx))),
                Span::styled(fit_width(&slice.label, label_width), theme.text),
                Span::styled(
                    format!(" {}%", format_number(slice.percent, 1)),
                    theme.value,
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(legend)), legend_area);
}

// ── Line chart ────────────────────────────────────────────────────────────────

/// `(index, revenue)` points for the monthly line.
pub fn month_points(months: &[GroupTotal]) -> Vec<(f64, f64)> {
    months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.value))
        .collect()
}

/// X-axis labels: every month when they fit, otherwise first and last.
pub fn month_labels(months: &[GroupTotal]) -> Vec<String> {
    if months.len() <= MAX_MONTH_LABELS {
        return months.iter().map(|m| m.key.clone()).collect();
    }
    match (months.first(), months.last()) {
        (Some(first), Some(last)) => vec![first.key.clone(), last.key.clone()],
        _ => Vec::new(),
    }
}

pub fn render_monthly_revenue(frame: &mut Frame, area: Rect, months: &[GroupTotal], theme: &Theme) {
    let block = panel("Monthly Revenue", theme);
    if months.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No months to chart", theme.dim)).block(block),
            area,
        );
        return;
    }

    let points = month_points(months);
    let max_value = months.iter().map(|m| m.value).fold(0.0_f64, f64::max);
    let y_max = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };
    let x_max = (months.len().saturating_sub(1) as f64).max(1.0);

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&points),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.chart_marker)
            .data(&points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, x_max])
                .labels(month_labels(months)),
        )
        .y_axis(
            Axis::default()
                .title("R$")
                .style(theme.chart_axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    format_currency(y_max / 2.0),
                    format_currency(y_max),
                ]),
        );

    frame.render_widget(chart, area);
}

// ── Blank panel ───────────────────────────────────────────────────────────────

/// The fourth grid cell is deliberately left empty.
pub fn render_blank_panel(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.dim),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
