mod bootstrap;

use anyhow::Result;
use jobmon_core::settings::Settings;
use jobmon_data::analysis::monitor_log;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Job Monitor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Log: {}, Report: {}, Thresholds: {}s warning / {}s error",
        settings.log_file.display(),
        settings.report_file.display(),
        settings.warning_threshold_secs,
        settings.error_threshold_secs
    );

    settings.validate()?;

    let result = monitor_log(
        &settings.log_file,
        &settings.report_file,
        &settings.thresholds(),
    )?;

    tracing::info!(
        "Parsed {} records from {} lines; {} complete jobs, {} reported",
        result.metadata.records_parsed,
        result.metadata.lines_read,
        result.metadata.jobs_matched,
        result.metadata.jobs_reported
    );
    println!(
        "Monitoring complete. See {} for warnings and errors.",
        settings.report_file.display()
    );

    Ok(())
}
