use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  Anything else yields
/// [`BackgroundType::Unknown`].
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .map(background_from_colorfgbg)
        .unwrap_or(BackgroundType::Unknown)
}

/// Classify a `COLORFGBG` value.
pub fn background_from_colorfgbg(value: &str) -> BackgroundType {
    match value.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) if bg <= 6 => BackgroundType::Dark,
        Some(_) => BackgroundType::Light,
        None => BackgroundType::Unknown,
    }
}

/// Every style the dashboard widgets draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub highlight: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub border: Style,
    pub panel_title: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Bars of the units-by-product chart.
    pub chart_bar: Style,
    /// Value labels drawn inside the bars.
    pub chart_bar_value: Style,
    /// Line of the monthly revenue chart.
    pub chart_line: Style,
    /// Point markers on the monthly revenue line.
    pub chart_marker: Style,
    pub chart_axis: Style,
    /// Slice colours for the category pie, cycled when there are more slices.
    pub chart_palette: [Color; 6],

    // ── Dialog ───────────────────────────────────────────────────────────────
    pub dialog_border: Style,
    pub dialog_text: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            border: Style::default().fg(Color::DarkGray),
            panel_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            chart_bar: Style::default().fg(Color::Rgb(0x4E, 0xCD, 0xC4)),
            chart_bar_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(0x4E, 0xCD, 0xC4)),
            chart_line: Style::default().fg(Color::Rgb(0xFF, 0x6B, 0x6B)),
            chart_marker: Style::default().fg(Color::White),
            chart_axis: Style::default().fg(Color::Gray),
            chart_palette: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::LightRed,
                Color::LightBlue,
            ],

            dialog_border: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            dialog_text: Style::default().fg(Color::White),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            border: Style::default().fg(Color::Gray),
            panel_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            chart_bar: Style::default().fg(Color::Rgb(0x1F, 0x8A, 0x84)),
            chart_bar_value: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0x1F, 0x8A, 0x84)),
            chart_line: Style::default().fg(Color::Rgb(0xD6, 0x3A, 0x3A)),
            chart_marker: Style::default().fg(Color::Black),
            chart_axis: Style::default().fg(Color::DarkGray),
            chart_palette: [
                Color::Blue,
                Color::Magenta,
                Color::Rgb(0xB8, 0x86, 0x0B),
                Color::Green,
                Color::Red,
                Color::Cyan,
            ],

            dialog_border: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            dialog_text: Style::default().fg(Color::Black),
        }
    }

    /// Classic terminal theme using only the basic ANSI palette.
    ///
    /// Avoids bold modifiers and RGB colours to maximise compatibility with
    /// minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            highlight: Style::default().fg(Color::Yellow),

            border: Style::default().fg(Color::DarkGray),
            panel_title: Style::default().fg(Color::Cyan),

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            chart_bar: Style::default().fg(Color::Cyan),
            chart_bar_value: Style::default().fg(Color::Black).bg(Color::Cyan),
            chart_line: Style::default().fg(Color::Red),
            chart_marker: Style::default().fg(Color::White),
            chart_axis: Style::default().fg(Color::Gray),
            chart_palette: [
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Red,
                Color::Blue,
            ],

            dialog_border: Style::default().fg(Color::Red),
            dialog_text: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Colour of the `index`-th pie slice.
    pub fn slice_color(&self, index: usize) -> Color {
        self.chart_palette[index % self.chart_palette.len()]
    }

    /// Alternate row styling for tables.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.chart_bar.fg, Some(Color::Rgb(0x4E, 0xCD, 0xC4)));
        assert_eq!(t.chart_line.fg, Some(Color::Rgb(0xFF, 0x6B, 0x6B)));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold_or_rgb() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.table_total.add_modifier.contains(Modifier::BOLD));
        assert!(!t.dialog_border.add_modifier.contains(Modifier::BOLD));
        assert!(t
            .chart_palette
            .iter()
            .all(|c| !matches!(c, Color::Rgb(..))));
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    // ── background detection ─────────────────────────────────────────────────

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg("15;0"), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg("0;15"), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg("0;default"), BackgroundType::Unknown);
        assert_eq!(background_from_colorfgbg(""), BackgroundType::Unknown);
    }

    // ── helpers ──────────────────────────────────────────────────────────────

    #[test]
    fn test_slice_color_cycles() {
        let t = Theme::dark();
        assert_eq!(t.slice_color(0), t.chart_palette[0]);
        assert_eq!(t.slice_color(6), t.chart_palette[0]);
        assert_eq!(t.slice_color(7), t.chart_palette[1]);
    }

    #[test]
    fn test_row_style_alternates() {
        let t = Theme::dark();
        assert_eq!(t.row_style(0), t.table_row);
        assert_eq!(t.row_style(1), t.table_row_alt);
        assert_eq!(t.row_style(2), t.table_row);
    }
}
