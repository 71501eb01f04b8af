//! Record parsing for Job Monitor.
//!
//! Turns raw comma-separated log lines into [`EventRecord`]s. Malformed
//! input is an expected condition: a bad line produces no record and a
//! debug-level breadcrumb, never an error past this boundary.

use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;
use tracing::debug;

use crate::models::{EventKind, EventRecord};

/// Wire format of the timestamp field.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Fields per line: timestamp, description, event kind, job id.
const FIELD_COUNT: usize = 4;

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").expect("clock pattern compiles"))
}

/// Parse a strict `HH:MM:SS` time-of-day string.
///
/// The shape check rejects loose inputs chrono would otherwise accept
/// (single-digit hours, trailing garbage); the chrono parse then rejects
/// out-of-range components like `25:00:00`.
pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    if !clock_pattern().is_match(s) {
        return None;
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT).ok()
}

/// Parse one raw log line into an [`EventRecord`].
///
/// Expects exactly four comma-separated fields:
/// `HH:MM:SS,<description>,<START|END>,<job id>`. Every field is
/// whitespace-trimmed. The event kind is an exact, case-sensitive match.
/// The job id is opaque but must be non-empty; the description may be empty.
///
/// Returns `None` for any violation — the line is discarded and parsing
/// continues with the next one.
pub fn parse_line(line: &str) -> Option<EventRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        debug!("Skipping line with {} fields: {:?}", fields.len(), line);
        return None;
    }

    let time = match parse_clock_time(fields[0].trim()) {
        Some(t) => t,
        None => {
            debug!("Skipping line with invalid timestamp: {:?}", line);
            return None;
        }
    };

    let kind = match fields[2].trim() {
        "START" => EventKind::Start,
        "END" => EventKind::End,
        other => {
            debug!("Skipping line with unknown event kind {:?}: {:?}", other, line);
            return None;
        }
    };

    let job_id = fields[3].trim();
    if job_id.is_empty() {
        debug!("Skipping line with empty job id: {:?}", line);
        return None;
    }

    Some(EventRecord {
        time,
        description: fields[1].trim().to_string(),
        kind,
        job_id: job_id.to_string(),
    })
}

/// Parse an ordered sequence of raw lines, preserving input order.
///
/// Blank lines and malformed lines are skipped; the result contains one
/// record per line that parsed.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<EventRecord> {
    let records: Vec<EventRecord> = lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect();

    debug!("Parsed {} records from {} lines", records.len(), lines.len());
    records
}
