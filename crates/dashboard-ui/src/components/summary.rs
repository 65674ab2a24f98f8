use dashboard_core::formatting::{format_currency, format_quantity};
use dashboard_core::models::MetricsSummary;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// The executive summary block: four labelled headline figures.
pub struct SummaryPanel<'a> {
    pub metrics: &'a MetricsSummary,
    pub theme: &'a Theme,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(metrics: &'a MetricsSummary, theme: &'a Theme) -> Self {
        Self { metrics, theme }
    }

    /// Rows needed to draw the panel including its border.
    pub const HEIGHT: u16 = 6;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let m = self.metrics;
        vec![
            self.line(
                "Total Units Sold: ",
                format!("{} units", format_quantity(m.total_units)),
            ),
            self.line("Total Revenue: ", format_currency(m.total_revenue)),
            self.line(
                "Average Revenue per Unit: ",
                format_currency(m.average_revenue_per_unit),
            ),
            Line::from(vec![
                Span::styled("Top Product: ", self.theme.label),
                Span::styled(m.top_product.clone(), self.theme.highlight),
            ]),
        ]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title(Span::styled(" Executive Summary ", self.theme.panel_title));
        frame.render_widget(
            Paragraph::new(Text::from(self.to_lines())).block(block),
            area,
        );
    }

    fn line(&self, label: &'static str, value: String) -> Line<'a> {
        Line::from(vec![
            Span::styled(label, self.theme.label),
            Span::styled(value, self.theme.value),
        ])
    }
}
