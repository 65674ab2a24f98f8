mod bootstrap;

use anyhow::Result;
use dashboard_core::models::MonthOrder;
use dashboard_core::settings::Settings;
use dashboard_data::analysis::analyze_sales;
use dashboard_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Sales Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, Theme: {}, Month order: {}",
        settings.file.display(),
        settings.theme,
        settings.month_order
    );

    let month_order = MonthOrder::from_name(&settings.month_order);
    let app = App::new(&settings.theme);

    match analyze_sales(&settings.file, month_order) {
        Ok(report) => {
            app.run(&report)?;
            tracing::info!("Dashboard closed");
            Ok(())
        }
        Err(err) => {
            tracing::error!("{}", err);
            // The error is returned below either way; a failed dialog is only logged.
            if let Err(ui_err) = app.run_error(&err.to_string()) {
                tracing::warn!("could not show error dialog: {}", ui_err);
            }
            Err(err.into())
        }
    }
}
