//! Application state and the terminal event loop for the sales dashboard.
//!
//! [`App`] owns the theme and the product-table scroll position.  The
//! dashboard is static once computed, so the loop only redraws and reacts to
//! keys until the user quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};

use dashboard_data::analysis::DashboardReport;

use crate::charts::{self, ChartData};
use crate::components::dialog::ErrorDialog;
use crate::components::header::Header;
use crate::components::summary::SummaryPanel;
use crate::table_view;
use crate::themes::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Redraw,
    Ignore,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Set once a quit key has been pressed.
    pub should_quit: bool,
    /// First product row shown in the breakdown table.
    pub table_offset: usize,
    /// Height of the table area at the last draw, used for paging.
    table_height: u16,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            should_quit: false,
            table_offset: 0,
            table_height: 0,
        }
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Show the dashboard for `report` until `q`, `Esc` or `Ctrl+C`.
    pub fn run(mut self, report: &DashboardReport) -> io::Result<()> {
        tracing::debug!(
            products = report.products.len(),
            categories = report.categories.len(),
            months = report.months.len(),
            "starting dashboard event loop"
        );
        let mut terminal = setup_terminal()?;

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame, report)) {
                break Err(e);
            }

            match event::poll(TICK_RATE) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => break Err(e),
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if self.handle_key(key, report.products.len()) == KeyAction::Quit {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e),
            }
        };

        // Restore terminal state unconditionally.
        restore_terminal(&mut terminal)?;
        result
    }

    /// Show a modal error dialog and block until any key is pressed.
    pub fn run_error(self, message: &str) -> io::Result<()> {
        tracing::debug!("showing error dialog");
        let mut terminal = setup_terminal()?;

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render_error(frame, message)) {
                break Err(e);
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(e),
            }
        };

        restore_terminal(&mut terminal)?;
        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply a key press to the app state.  `rows` is the number of products
    /// in the breakdown table.
    pub fn handle_key(&mut self, key: KeyEvent, rows: usize) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignore;
        }

        let page = table_view::visible_rows(self.table_height).max(1);
        let max_offset = table_view::max_offset(rows, self.table_height);

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return KeyAction::Quit;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return KeyAction::Quit;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.table_offset = (self.table_offset + 1).min(max_offset);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.table_offset = self.table_offset.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.table_offset = (self.table_offset + page).min(max_offset);
            }
            KeyCode::PageUp => {
                self.table_offset = self.table_offset.saturating_sub(page);
            }
            KeyCode::Home => self.table_offset = 0,
            KeyCode::End => self.table_offset = max_offset,
            _ => return KeyAction::Ignore,
        }
        KeyAction::Redraw
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the full dashboard into `frame`.
    pub fn render(&mut self, frame: &mut Frame, report: &DashboardReport) {
        let [header_area, summary_area, table_area, charts_area, footer_area] =
            Layout::vertical([
                Constraint::Length(Header::HEIGHT),
                Constraint::Length(SummaryPanel::HEIGHT),
                Constraint::Percentage(30),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        let file_name = report
            .table
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.table.source.display().to_string());
        let header = Header::new(&file_name, &report.table.sheet, report.table.len(), &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        SummaryPanel::new(&report.metrics, &self.theme).render(frame, summary_area);

        self.table_height = table_area.height;
        self.table_offset = self
            .table_offset
            .min(table_view::max_offset(report.products.len(), table_area.height));
        table_view::render_product_table(
            frame,
            table_area,
            &report.products,
            &report.product_totals,
            self.table_offset,
            &self.theme,
        );

        let data = ChartData {
            products: &report.products,
            categories: &report.categories,
            months: &report.months,
        };
        charts::render_chart_grid(frame, charts_area, &data, &self.theme);

        render_footer(frame, footer_area, &self.theme);
    }

    /// Draw the error dialog over an otherwise empty screen.
    pub fn render_error(&self, frame: &mut Frame, message: &str) {
        let area = frame.area();
        ErrorDialog::new("Error", message, &self.theme).render(frame, area);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("q", theme.highlight),
        Span::styled(" quit  ", theme.dim),
        Span::styled("↑/↓ PgUp/PgDn", theme.highlight),
        Span::styled(" scroll products", theme.dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

// ── Terminal setup ────────────────────────────────────────────────────────────

type DashboardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> io::Result<DashboardTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut DashboardTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::{MonthOrder, SalesRecord, SalesTable};
    use dashboard_data::analysis::build_report;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_report(products: usize) -> DashboardReport {
        let records = (0..products)
            .map(|i| {
                SalesRecord::new(
                    format!("Item{:02}", i),
                    if i % 2 == 0 { "A" } else { "B" },
                    if i % 3 == 0 { "Jan" } else { "Feb" },
                    (i + 1) as f64,
                    2.0,
                )
            })
            .collect();
        let table = SalesTable::new("/data/vendas.xlsx", "Sheet1", records);
        build_report(table, MonthOrder::Grouped).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("dark");
        assert!(!app.should_quit);
        assert_eq!(app.table_offset, 0);
        assert_eq!(app.theme.chart_bar, Theme::dark().chart_bar);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        // Must not panic.
        let _ = App::new("no-such-theme");
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut app = App::new("dark");
            assert_eq!(app.handle_key(press(code), 3), KeyAction::Quit);
            assert!(app.should_quit);
        }

        let mut app = App::new("dark");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c, 3), KeyAction::Quit);
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        let mut app = App::new("dark");
        assert_eq!(app.handle_key(press(KeyCode::Char('c')), 3), KeyAction::Ignore);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = App::new("dark");
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(app.handle_key(release, 3), KeyAction::Ignore);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut app = App::new("dark");
        // 10-row table → 6 visible rows; 20 products → max offset 14.
        app.table_height = 10;

        app.handle_key(press(KeyCode::Up), 20);
        assert_eq!(app.table_offset, 0);

        assert_eq!(app.handle_key(press(KeyCode::Down), 20), KeyAction::Redraw);
        assert_eq!(app.table_offset, 1);

        app.handle_key(press(KeyCode::PageDown), 20);
        assert_eq!(app.table_offset, 7);

        app.handle_key(press(KeyCode::PageDown), 20);
        app.handle_key(press(KeyCode::PageDown), 20);
        assert_eq!(app.table_offset, 14);

        app.handle_key(press(KeyCode::PageUp), 20);
        assert_eq!(app.table_offset, 8);

        app.handle_key(press(KeyCode::Home), 20);
        assert_eq!(app.table_offset, 0);

        app.handle_key(press(KeyCode::End), 20);
        assert_eq!(app.table_offset, 14);
    }

    #[test]
    fn test_scrolling_with_everything_visible() {
        let mut app = App::new("dark");
        app.table_height = 30;
        app.handle_key(press(KeyCode::Down), 3);
        app.handle_key(press(KeyCode::End), 3);
        assert_eq!(app.table_offset, 0);
    }

    // ── render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_dashboard() {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        let mut app = App::new("dark");
        let report = make_report(4);

        terminal.draw(|frame| app.render(frame, &report)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("SALES DASHBOARD"));
        assert!(text.contains("vendas.xlsx | Sheet1 | 4 records"));
        assert!(text.contains("Executive Summary"));
        assert!(text.contains("Product Breakdown"));
        assert!(text.contains("Units Sold by Product"));
        assert!(text.contains("Revenue by Category"));
        assert!(text.contains("Monthly Revenue"));
        assert!(text.contains("q quit"));
        assert!(app.table_height > 0);
    }

    #[test]
    fn test_render_clamps_stale_offset() {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        let mut app = App::new("dark");
        app.table_offset = 500;
        let report = make_report(3);

        terminal.draw(|frame| app.render(frame, &report)).unwrap();
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        let mut app = App::new("classic");
        let report = make_report(5);

        terminal.draw(|frame| app.render(frame, &report)).unwrap();
    }

    #[test]
    fn test_render_error_dialog() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let app = App::new("dark");

        terminal
            .draw(|frame| app.render_error(frame, "File not found: vendas.xlsx"))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("File not found: vendas.xlsx"));
        assert!(text.contains("Press any key to exit"));
    }
}
