//! Job matching for Job Monitor.
//!
//! Pairs START and END events by job id over the ordered record sequence and
//! emits one [`JobSummary`] per job that has both halves. Unmatched halves
//! never surface downstream.

use std::collections::HashMap;

use chrono::NaiveTime;
use jobmon_core::models::{EventKind, EventRecord, JobSummary};
use tracing::debug;

/// Accumulated halves for one job id.
#[derive(Debug, Default)]
struct PendingJob {
    /// Most recently seen START: timestamp plus the description it carried.
    start: Option<(NaiveTime, String)>,
    /// Most recently seen END timestamp.
    end: Option<NaiveTime>,
    /// Set once both halves have been observed; guards the output order list.
    completed: bool,
}

/// Pair START/END events into completed jobs.
///
/// Single pass in input order (records are assumed chronological in the log;
/// no re-sorting happens here). Duplicate START or END events for one job id
/// are last-write-wins: a later duplicate overwrites its half even after the
/// job already completed. Output order is the order in which jobs first had
/// both halves present; values come from the final accumulated state.
///
/// Duration is the signed span `end - start`; an END recorded earlier in the
/// day than its START yields a negative span, passed through unmodified for
/// the classifier to judge.
pub fn match_jobs(records: &[EventRecord]) -> Vec<JobSummary> {
    let mut pending: HashMap<String, PendingJob> = HashMap::new();
    let mut completion_order: Vec<String> = Vec::new();

    for record in records {
        let job = pending.entry(record.job_id.clone()).or_default();
        match record.kind {
            EventKind::Start => job.start = Some((record.time, record.description.clone())),
            EventKind::End => job.end = Some(record.time),
        }
        if !job.completed && job.start.is_some() && job.end.is_some() {
            job.completed = true;
            completion_order.push(record.job_id.clone());
        }
    }

    let summaries: Vec<JobSummary> = completion_order
        .iter()
        .filter_map(|job_id| {
            let job = pending.get(job_id)?;
            let (start_time, description) = job.start.clone()?;
            let end_time = job.end?;
            Some(JobSummary {
                job_id: job_id.clone(),
                description,
                start_time,
                end_time,
                duration: end_time - start_time,
                complete: true,
            })
        })
        .collect();

    debug!(
        "Matched {} complete jobs from {} records",
        summaries.len(),
        records.len()
    );
    summaries
}
