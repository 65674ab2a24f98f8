use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::themes::Theme;

/// A centred modal box showing a single error message.
pub struct ErrorDialog<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(title: &'a str, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(area, 60, 9);
        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(self.message, self.theme.dialog_text)),
            Line::from(""),
            Line::from(Span::styled("Press any key to exit", self.theme.dim)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dialog_border)
            .title(Span::styled(
                format!(" {} ", self.title),
                self.theme.dialog_border,
            ));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            popup,
        );
    }
}

/// A `width_percent`-wide, `height`-row rectangle centred in `area`.
pub fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_centered_rect_is_centred() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(area, 60, 9);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 9);
        assert_eq!(popup.x, 20);
        assert!(popup.y >= 15 && popup.y <= 16, "y = {}", popup.y);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered_rect(area, 60, 9);
        assert!(popup.height <= 5);
        assert!(popup.width <= 20);
    }

    #[test]
    fn test_dialog_renders_message() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                ErrorDialog::new("Error", "Column 'Mes' not found", &theme).render(frame, area);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Column 'Mes' not found"));
        assert!(text.contains("Press any key to exit"));
        assert!(text.contains(" Error "));
    }
}
