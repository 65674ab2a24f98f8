use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto a `tracing` filter directive.
///
/// `CRITICAL` has no `tracing` equivalent and maps to `error`.  Unrecognised
/// names pass through lowercased so `EnvFilter` can still try them.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Build the filter for `log_level`, falling back to `warn`.
pub fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialise the global `tracing` subscriber.
///
/// With a `log_file` the output is appended there without ANSI colours,
/// which keeps it off the terminal the dashboard draws on.  Otherwise it goes
/// to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = build_filter(log_level);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = log_file.is_none().then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing the tracing subscriber")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── normalise_level ───────────────────────────────────────────────────────

    #[test]
    fn test_normalise_level_known_names() {
        assert_eq!(normalise_level("DEBUG"), "debug");
        assert_eq!(normalise_level("INFO"), "info");
        assert_eq!(normalise_level("WARNING"), "warn");
        assert_eq!(normalise_level("ERROR"), "error");
        assert_eq!(normalise_level("CRITICAL"), "error");
    }

    #[test]
    fn test_normalise_level_is_case_insensitive() {
        assert_eq!(normalise_level("warning"), "warn");
        assert_eq!(normalise_level("Debug"), "debug");
    }

    #[test]
    fn test_normalise_level_passes_through_unknown() {
        assert_eq!(normalise_level("TRACE"), "trace");
    }

    #[test]
    fn test_build_filter_falls_back_on_garbage() {
        let filter = build_filter("dashboard=loud");
        assert_eq!(filter.to_string(), "warn");
    }

    // ── setup_logging ─────────────────────────────────────────────────────────

    // Only one test may install the global subscriber per process.
    #[test]
    fn test_setup_logging_writes_to_file() {
        let tmp = TempDir::new().expect("tempdir");
        let log_path = tmp.path().join("logs").join("dashboard.log");

        setup_logging("INFO", Some(&log_path)).expect("logging should initialise");
        tracing::info!("loaded 3 records");
        tracing::debug!("this line is filtered out");

        let contents = std::fs::read_to_string(&log_path).expect("log file exists");
        assert!(contents.contains("loaded 3 records"), "got: {contents}");
        assert!(!contents.contains("filtered out"));
        assert!(!contents.contains('\u{1b}'), "no ANSI escapes in files");
    }
}
