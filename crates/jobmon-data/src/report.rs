//! Report rendering and persistence for Job Monitor.

use std::path::Path;

use jobmon_core::error::{MonitorError, Result};
use jobmon_core::formatting::format_duration;
use jobmon_core::models::ClassifiedJob;
use tracing::debug;

/// Render classified jobs into report lines.
///
/// Jobs with severity `None` are omitted entirely; the rest render as
/// `"{SEVERITY}: Job {id} ({description}) took {duration}"` in the order the
/// matcher produced them — no re-sorting by severity or duration.
pub fn render_report_lines(jobs: &[ClassifiedJob]) -> Vec<String> {
    jobs.iter()
        .filter(|job| job.severity.is_reportable())
        .map(|job| {
            format!(
                "{}: Job {} ({}) took {}",
                job.severity.label(),
                job.summary.job_id,
                job.summary.description,
                format_duration(job.summary.duration)
            )
        })
        .collect()
}

/// Persist report lines to `path`, fully overwriting any prior content.
///
/// The content is written to a temp file and renamed into place, so the
/// destination is never left half-written. An empty report still truncates
/// the destination, which keeps reruns byte-identical.
pub fn write_report(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }

    let to_write_err = |source| MonitorError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, content).map_err(to_write_err)?;
    std::fs::rename(&tmp, path).map_err(to_write_err)?;

    debug!("Wrote {} report lines to {}", lines.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeDelta};
    use jobmon_core::models::{JobSummary, Severity};
    use tempfile::TempDir;

    fn classified(job_id: &str, description: &str, secs: i64, severity: Severity) -> ClassifiedJob {
        let start = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        ClassifiedJob {
            summary: JobSummary {
                job_id: job_id.to_string(),
                description: description.to_string(),
                start_time: start,
                end_time: start + TimeDelta::seconds(secs),
                duration: TimeDelta::seconds(secs),
                complete: true,
            },
            severity,
        }
    }

    // ── render_report_lines ────────────────────────────────────────────────

    #[test]
    fn test_render_omits_none_severity() {
        let jobs = [
            classified("1", "Job A", 299, Severity::None),
            classified("2", "Job B", 360, Severity::Warning),
            classified("3", "Job C", 660, Severity::Error),
        ];

        let lines = render_report_lines(&jobs);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "WARNING: Job 2 (Job B) took 6m");
        assert_eq!(lines[1], "ERROR: Job 3 (Job C) took 11m");
    }

    #[test]
    fn test_render_preserves_matcher_order() {
        // An error ahead of a warning stays ahead; no severity sort.
        let jobs = [
            classified("9", "Job X", 700, Severity::Error),
            classified("4", "Job Y", 400, Severity::Warning),
        ];

        let lines = render_report_lines(&jobs);
        assert!(lines[0].starts_with("ERROR: Job 9"));
        assert!(lines[1].starts_with("WARNING: Job 4"));
    }

    #[test]
    fn test_render_anomalous_line() {
        let jobs = [classified("5", "Job Z", -125, Severity::Anomalous)];
        let lines = render_report_lines(&jobs);
        assert_eq!(lines, vec!["ANOMALOUS: Job 5 (Job Z) took -2m 5s"]);
    }

    #[test]
    fn test_render_empty_input() {
        assert!(render_report_lines(&[]).is_empty());
    }

    // ── write_report ───────────────────────────────────────────────────────

    #[test]
    fn test_write_report_creates_file_with_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.log");

        let lines = vec!["WARNING: Job 2 (Job B) took 6m".to_string()];
        write_report(&path, &lines).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "WARNING: Job 2 (Job B) took 6m\n");
    }

    #[test]
    fn test_write_report_overwrites_prior_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.log");
        std::fs::write(&path, "stale content from a previous run\n").unwrap();

        let lines = vec!["ERROR: Job 3 (Job C) took 11m".to_string()];
        write_report(&path, &lines).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ERROR: Job 3 (Job C) took 11m\n");
    }

    #[test]
    fn test_write_report_empty_lines_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.log");
        std::fs::write(&path, "stale content\n").unwrap();

        write_report(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_write_report_unwritable_destination_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-subdir").join("report.log");

        let err = write_report(&path, &[]).unwrap_err();
        match err {
            MonitorError::ReportWrite { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected ReportWrite, got {:?}", other),
        }
    }
}
