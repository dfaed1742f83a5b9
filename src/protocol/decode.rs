//! Reply decoding
//!
//! Turns the framed lines of a reply into the typed result of each command.
//!
//! ## Line Grammars
//! ```text
//! status:   <function>\t<in-queue>\t<running>\t<capable-workers>
//! workers:  <fd>[ \t]<host>[ \t]<job-handle> :[ ]<functions>
//! version:  OK <version>
//! maxqueue / shutdown:  OK
//! ```
//!
//! Malformed `status` and `workers` lines are skipped. Skipped `status` lines
//! are logged at warn level, skipped `workers` lines at debug level.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{AdminError, Result};
use super::{FunctionStatus, WorkerInfo, OK_LINE};

/// Width of the status prefix in front of the version string
pub const VERSION_PREFIX_LEN: usize = 3;

/// Decoded `status` reply, in server order
pub type StatusMap = IndexMap<String, FunctionStatus>;

static WORKER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)[ \t](.*?)[ \t](.*?) : ?(.*)").expect("constant regex pattern is valid")
});

/// Decode the `status` reply
///
/// A repeated function name overwrites the earlier row.
pub fn decode_status<S: AsRef<str>>(lines: &[S]) -> StatusMap {
    let mut status = StatusMap::with_capacity(lines.len());
    for line in lines {
        let line: &str = line.as_ref();
        match parse_status_line(line) {
            Some(row) => {
                status.insert(row.function.clone(), row);
            }
            None => tracing::warn!("Skipping malformed status line: {:?}", line),
        }
    }
    status
}

/// Parse one tab-separated status row
pub fn parse_status_line(line: &str) -> Option<FunctionStatus> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [function, in_queue, jobs_running, capable_workers] = fields.as_slice() else {
        return None;
    };

    Some(FunctionStatus {
        function: function.to_string(),
        in_queue: in_queue.trim().parse().ok()?,
        jobs_running: jobs_running.trim().parse().ok()?,
        capable_workers: capable_workers.trim().parse().ok()?,
    })
}

/// Decode the `version` reply from its last line
pub fn decode_version<S: AsRef<str>>(lines: &[S]) -> Result<String> {
    let last = lines
        .last()
        .ok_or_else(|| AdminError::Decode("version: server sent no lines".to_string()))?;

    let last: &str = last.as_ref();
    Ok(last.chars().skip(VERSION_PREFIX_LEN).collect())
}

/// Decode the `workers` reply, skipping lines outside the grammar
pub fn decode_workers<S: AsRef<str>>(lines: &[S]) -> Vec<WorkerInfo> {
    lines
        .iter()
        .filter_map(|line| {
            let line: &str = line.as_ref();
            let worker = parse_worker_line(line);
            if worker.is_none() {
                tracing::debug!("Skipping unrecognised workers line: {:?}", line);
            }
            worker
        })
        .collect()
}

/// Parse one worker row
pub fn parse_worker_line(line: &str) -> Option<WorkerInfo> {
    let caps = WORKER_LINE.captures(line)?;
    Some(WorkerInfo {
        file_descriptor: caps[1].parse().ok()?,
        host: caps[2].to_string(),
        job_handle: caps[3].to_string(),
        functions: caps[4].to_string(),
    })
}

/// True iff the last line of the reply is exactly `OK`
pub fn decode_ok<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .last()
        .is_some_and(|line| AsRef::<str>::as_ref(line) == OK_LINE)
}
