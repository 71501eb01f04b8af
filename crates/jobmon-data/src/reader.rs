//! Line source for Job Monitor.
//!
//! The one place the pipeline touches the input file: given a path, return
//! its ordered lines. Everything downstream works on in-memory slices, so
//! tests never need a real log file.

use std::io::BufRead;
use std::path::Path;

use jobmon_core::error::{MonitorError, Result};
use tracing::debug;

/// Read the job event log, returning its lines in file order.
///
/// Unlike a malformed line, an unreadable file is fatal to the run: open
/// and read failures map to [`MonitorError::FileRead`] and propagate.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).map_err(|source| MonitorError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = std::io::BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| MonitorError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        lines.push(line);
    }

    debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
