use super::LogEntry;
use crate::error::Error;

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifier of a download job.
///
/// Derived from the creation time in milliseconds since the Unix epoch and
/// strictly increasing within a process. It also names the job directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(u64);

impl JobId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Gets the raw identifier.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(JobId)
            .map_err(|_| Error::JobNotFound { id: s.to_string() })
    }
}

/// Lifecycle of a job once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobStatus {
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Whether the job reached a final state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// A download job with its audit log.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadJob {
    pub id: JobId,
    pub created_at: DateTime<Local>,
    pub status: JobStatus,
    /// Set once the job reaches a terminal status.
    pub finished_at: Option<DateTime<Local>>,
    pub log: Vec<LogEntry>,
}

impl DownloadJob {
    pub(crate) fn new(id: JobId) -> Self {
        Self {
            id,
            created_at: Local::now(),
            status: JobStatus::Running,
            finished_at: None,
            log: Vec::new(),
        }
    }
}
