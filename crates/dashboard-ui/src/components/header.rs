use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decoration placed either side of the dashboard title.
pub const ORNAMENT: &str = "━━━";

/// Dashboard header rendering three lines:
///
/// 1. Title with ornaments.
/// 2. A 60-column `=` separator.
/// 3. Source information in `[ file | sheet | N records ]` format.
pub struct Header<'a> {
    /// Spreadsheet file name (without directories).
    pub file_name: &'a str,
    /// Worksheet the data came from.
    pub sheet: &'a str,
    /// Number of sales records loaded.
    pub records: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(file_name: &'a str, sheet: &'a str, records: usize, theme: &'a Theme) -> Self {
        Self {
            file_name,
            sheet,
            records,
            theme,
        }
    }

    /// Number of lines produced by [`Header::to_lines`].
    pub const HEIGHT: u16 = 3;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let records = if self.records == 1 {
            "1 record".to_string()
        } else {
            format!("{} records", self.records)
        };

        vec![
            Line::from(vec![
                Span::styled(ORNAMENT, self.theme.header_accent),
                Span::styled(" SALES DASHBOARD ", self.theme.header),
                Span::styled(ORNAMENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.file_name, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.sheet, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(records, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count_matches_height() {
        let theme = Theme::dark();
        let lines = Header::new("vendas.xlsx", "Sheet1", 3, &theme).to_lines();
        assert_eq!(lines.len(), Header::HEIGHT as usize);
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new("vendas.xlsx", "Sheet1", 3, &theme).to_lines();
        let title = line_text(&lines[0]);

        assert!(title.contains("SALES DASHBOARD"), "got: {title}");
        assert!(title.starts_with(ORNAMENT));
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new("vendas.xlsx", "Sheet1", 3, &theme).to_lines();
        let sep = line_text(&lines[1]);

        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line() {
        let theme = Theme::dark();
        let lines = Header::new("vendas.xlsx", "Vendas2024", 12, &theme).to_lines();
        let info = line_text(&lines[2]);

        assert_eq!(info, "[ vendas.xlsx | Vendas2024 | 12 records ]");
    }

    #[test]
    fn test_header_singular_record() {
        let theme = Theme::dark();
        let lines = Header::new("a.xlsx", "S", 1, &theme).to_lines();
        assert!(line_text(&lines[2]).contains("1 record ]"));
    }
}
