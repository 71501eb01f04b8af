use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Which lifecycle boundary a log line marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// The job began at the line's timestamp.
    Start,
    /// The job finished at the line's timestamp.
    End,
}

impl EventKind {
    /// The exact token used on the wire (`"START"` / `"END"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "START",
            EventKind::End => "END",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lifecycle event parsed from one log line.
///
/// Immutable once parsed; malformed lines never produce a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Time of day the event was logged.
    pub time: NaiveTime,
    /// Human-readable job description carried on the line.
    pub description: String,
    /// Whether this line marks the start or the end of the job.
    pub kind: EventKind,
    /// Opaque process identifier tying start and end together.
    pub job_id: String,
}

/// A job whose START and END events were both observed.
///
/// The matcher only ever emits complete jobs; a job id missing one half
/// never surfaces downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    /// Process identifier shared by the paired events.
    pub job_id: String,
    /// Description taken from the START record.
    pub description: String,
    /// Timestamp of the START record.
    pub start_time: NaiveTime,
    /// Timestamp of the END record.
    pub end_time: NaiveTime,
    /// Signed span `end_time - start_time`. Negative when the log records
    /// the END earlier in the day than the START.
    pub duration: TimeDelta,
    /// Always `true` for summaries the matcher emits.
    pub complete: bool,
}

impl JobSummary {
    /// Signed duration in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        self.duration.num_seconds()
    }
}

/// Classification of a job's duration relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Duration within both thresholds; omitted from the report.
    #[default]
    None,
    /// Duration strictly above the warning threshold.
    Warning,
    /// Duration strictly above the error threshold.
    Error,
    /// Negative duration: the END event precedes the START event in time.
    Anomalous,
}

impl Severity {
    /// Label used in report lines.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Anomalous => "ANOMALOUS",
        }
    }

    /// Whether jobs with this severity appear in the report.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Severity::None)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed job annotated with its severity. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedJob {
    pub summary: JobSummary,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary(duration_secs: i64) -> JobSummary {
        let start = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        JobSummary {
            job_id: "37980".to_string(),
            description: "scheduled task 032".to_string(),
            start_time: start,
            end_time: start + TimeDelta::seconds(duration_secs),
            duration: TimeDelta::seconds(duration_secs),
            complete: true,
        }
    }

    // ── EventKind ──────────────────────────────────────────────────────────

    #[test]
    fn test_event_kind_as_str() {
        assert_eq!(EventKind::Start.as_str(), "START");
        assert_eq!(EventKind::End.as_str(), "END");
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Start.to_string(), "START");
        assert_eq!(EventKind::End.to_string(), "END");
    }

    #[test]
    fn test_event_kind_serde_uppercase() {
        let json = serde_json::to_string(&EventKind::Start).unwrap();
        assert_eq!(json, r#""START""#);
        let back: EventKind = serde_json::from_str(r#""END""#).unwrap();
        assert_eq!(back, EventKind::End);
    }

    // ── EventRecord ────────────────────────────────────────────────────────

    #[test]
    fn test_event_record_serde_round_trip() {
        let record = EventRecord {
            time: NaiveTime::from_hms_opt(11, 35, 23).unwrap(),
            description: "scheduled task 032".to_string(),
            kind: EventKind::Start,
            job_id: "37980".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    // ── JobSummary ─────────────────────────────────────────────────────────

    #[test]
    fn test_job_summary_duration_seconds() {
        assert_eq!(sample_summary(426).duration_seconds(), 426);
    }

    #[test]
    fn test_job_summary_duration_seconds_negative() {
        assert_eq!(sample_summary(-30).duration_seconds(), -30);
    }

    // ── Severity ───────────────────────────────────────────────────────────

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::None.label(), "NONE");
        assert_eq!(Severity::Warning.label(), "WARNING");
        assert_eq!(Severity::Error.label(), "ERROR");
        assert_eq!(Severity::Anomalous.label(), "ANOMALOUS");
    }

    #[test]
    fn test_severity_reportable() {
        assert!(!Severity::None.is_reportable());
        assert!(Severity::Warning.is_reportable());
        assert!(Severity::Error.is_reportable());
        assert!(Severity::Anomalous.is_reportable());
    }

    #[test]
    fn test_severity_default_is_none() {
        assert_eq!(Severity::default(), Severity::None);
    }
}
