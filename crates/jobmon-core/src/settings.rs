use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classifier::{Thresholds, DEFAULT_ERROR_SECS, DEFAULT_WARNING_SECS};
use crate::error::{MonitorError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Batch job duration monitoring from lifecycle event logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "job-monitor",
    about = "Batch job duration monitoring from lifecycle event logs",
    version
)]
pub struct Settings {
    /// Path to the job event log to analyse
    #[arg(long, default_value = "logs.log")]
    pub log_file: PathBuf,

    /// Destination path for the generated report
    #[arg(long, default_value = "report.log")]
    pub report_file: PathBuf,

    /// Warning threshold in seconds
    #[arg(long, default_value_t = DEFAULT_WARNING_SECS, value_parser = clap::value_parser!(i64).range(1..))]
    pub warning_threshold_secs: i64,

    /// Error threshold in seconds
    #[arg(long, default_value_t = DEFAULT_ERROR_SECS, value_parser = clap::value_parser!(i64).range(1..))]
    pub error_threshold_secs: i64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.job-monitor/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_threshold_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_threshold_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.job-monitor/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".job-monitor").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent directories
    /// if needed.
    pub fn save(&self) -> std::result::Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default config file if it exists.
    pub fn clear() -> std::result::Result<(), std::io::Error> {
        Self::clear_at(&Self::config_path())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] but accepts an explicit
    /// argument list, enabling unit-testing without spawning subprocesses.
    pub fn load_with_last_used_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::load_with_last_used_impl(args, &LastUsedParams::config_path())
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            if settings.debug {
                settings.log_level = "DEBUG".to_string();
            }
            return settings;
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on the
        // command line (CLI always wins). The input log path is never loaded
        // from last-used.
        if !is_arg_explicitly_set(&matches, "report_file") {
            if let Some(v) = last.report_file {
                settings.report_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "warning_threshold_secs") {
            if let Some(v) = last.warning_threshold_secs {
                settings.warning_threshold_secs = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "error_threshold_secs") {
            if let Some(v) = last.error_threshold_secs {
                settings.error_threshold_secs = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "log_level") {
            if let Some(v) = last.log_level {
                settings.log_level = v;
            }
        }

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// The classifier thresholds configured by these settings.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from_secs(self.warning_threshold_secs, self.error_threshold_secs)
    }

    /// Reject threshold combinations that would make the warning band empty.
    pub fn validate(&self) -> Result<()> {
        if self.warning_threshold_secs >= self.error_threshold_secs {
            return Err(MonitorError::Config(format!(
                "warning threshold ({}s) must be below error threshold ({}s)",
                self.warning_threshold_secs, self.error_threshold_secs
            )));
        }
        Ok(())
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            report_file: Some(s.report_file.clone()),
            warning_threshold_secs: Some(s.warning_threshold_secs),
            error_threshold_secs: Some(s.error_threshold_secs),
            log_level: Some(s.log_level.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
