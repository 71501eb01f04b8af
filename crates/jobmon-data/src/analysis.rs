//! Main analysis pipeline for Job Monitor.
//!
//! Orchestrates parsing, job matching, classification and report rendering,
//! returning an [`AnalysisResult`]; [`monitor_log`] wraps the pure pipeline
//! with the file I/O at either end.

use std::path::Path;

use jobmon_core::classifier::{DurationClassifier, Thresholds};
use jobmon_core::error::Result;
use jobmon_core::models::ClassifiedJob;
use jobmon_core::parser::parse_lines;
use tracing::{debug, info};

use crate::matcher::match_jobs;
use crate::reader::read_log_lines;
use crate::report::{render_report_lines, write_report};

// ── Public types ──────────────────────────────────────────────────────────────

/// Counters produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// Raw lines taken from the input log.
    pub lines_read: usize,
    /// Lines that parsed into an event record.
    pub records_parsed: usize,
    /// Jobs with both a START and an END event.
    pub jobs_matched: usize,
    /// Jobs whose severity put them in the report.
    pub jobs_reported: usize,
}

/// The complete output of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Every complete job with its severity, in matcher output order.
    pub classified: Vec<ClassifiedJob>,
    /// The rendered report lines (reportable severities only).
    pub report_lines: Vec<String>,
    /// Counters for this run.
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the pure pipeline over in-memory lines.
///
/// parse → match → classify → render; no file access, so tests and embedders
/// can feed any line source.
pub fn run_pipeline<S: AsRef<str>>(lines: &[S], thresholds: &Thresholds) -> AnalysisResult {
    let records = parse_lines(lines);
    let summaries = match_jobs(&records);
    let classified = DurationClassifier::classify_jobs(summaries, thresholds);
    let report_lines = render_report_lines(&classified);

    let metadata = AnalysisMetadata {
        lines_read: lines.len(),
        records_parsed: records.len(),
        jobs_matched: classified.len(),
        jobs_reported: report_lines.len(),
    };
    debug!(
        "Pipeline: {} lines -> {} records -> {} jobs -> {} reported",
        metadata.lines_read, metadata.records_parsed, metadata.jobs_matched, metadata.jobs_reported
    );

    AnalysisResult {
        classified,
        report_lines,
        metadata,
    }
}

/// Run the full monitoring pass: read the log, run the pipeline, persist the
/// report.
///
/// Either I/O failure aborts the run; an unreadable input never produces a
/// partial report, and a failed write surfaces to the caller.
pub fn monitor_log(
    log_path: &Path,
    report_path: &Path,
    thresholds: &Thresholds,
) -> Result<AnalysisResult> {
    let lines = read_log_lines(log_path)?;
    let result = run_pipeline(&lines, thresholds);
    write_report(report_path, &result.report_lines)?;

    info!(
        "Monitored {}: {} of {} complete jobs reported",
        log_path.display(),
        result.metadata.jobs_reported,
        result.metadata.jobs_matched
    );
    Ok(result)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
