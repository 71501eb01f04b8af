use chrono::TimeDelta;

use crate::models::{ClassifiedJob, JobSummary, Severity};

/// Default warning threshold: 5 minutes.
pub const DEFAULT_WARNING_SECS: i64 = 300;

/// Default error threshold: 10 minutes.
pub const DEFAULT_ERROR_SECS: i64 = 600;

/// Duration thresholds against which completed jobs are classified.
///
/// Constructed from configuration and passed into the pipeline as a value;
/// nothing reads global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Spans strictly above this are at least a warning.
    pub warning: TimeDelta,
    /// Spans strictly above this are an error.
    pub error: TimeDelta,
}

impl Thresholds {
    /// Build thresholds from whole-second values.
    pub fn from_secs(warning_secs: i64, error_secs: i64) -> Self {
        Self {
            warning: TimeDelta::seconds(warning_secs),
            error: TimeDelta::seconds(error_secs),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from_secs(DEFAULT_WARNING_SECS, DEFAULT_ERROR_SECS)
    }
}

// ── DurationClassifier ────────────────────────────────────────────────────────

/// Stateless duration-to-severity classification.
pub struct DurationClassifier;

impl DurationClassifier {
    /// Map a signed duration to exactly one [`Severity`].
    ///
    /// Both comparisons are strict greater-than: a span exactly equal to a
    /// threshold does not cross it. The error check runs first, so error
    /// takes precedence over warning. Negative spans (END recorded before
    /// START) classify as [`Severity::Anomalous`] before any threshold
    /// comparison.
    pub fn classify(duration: TimeDelta, thresholds: &Thresholds) -> Severity {
        if duration < TimeDelta::zero() {
            return Severity::Anomalous;
        }
        if duration > thresholds.error {
            return Severity::Error;
        }
        if duration > thresholds.warning {
            return Severity::Warning;
        }
        Severity::None
    }

    /// Annotate each [`JobSummary`] with its severity, preserving order.
    pub fn classify_jobs(summaries: Vec<JobSummary>, thresholds: &Thresholds) -> Vec<ClassifiedJob> {
        summaries
            .into_iter()
            .map(|summary| {
                let severity = Self::classify(summary.duration, thresholds);
                ClassifiedJob { summary, severity }
            })
            .collect()
    }
}
