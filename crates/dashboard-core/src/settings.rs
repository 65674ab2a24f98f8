use clap::Parser;
use std::path::{Path, PathBuf};

/// Spreadsheet read when no path is given.
pub const DEFAULT_DATA_FILE: &str = "vendas.xlsx";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales dashboard for spreadsheet data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-dashboard",
    about = "Sales dashboard for spreadsheet data",
    version
)]
pub struct Settings {
    /// Spreadsheet with the sales data (xlsx, xls, ods)
    #[arg(short, long, env = "SALES_DASHBOARD_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Ordering of the monthly revenue chart
    #[arg(long, default_value = "grouped", value_parser = ["grouped", "calendar"])]
    pub month_order: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Expand `~` in paths and apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        settings.file = expand_home(&settings.file);
        settings.log_file = settings.log_file.as_deref().map(expand_home);

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────────

/// Replace a leading `~` component with the user's home directory.
///
/// Paths without a leading `~`, or systems without a home directory, are
/// returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
