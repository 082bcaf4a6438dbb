//! The process-wide job store.

use super::{DownloadJob, JobId, JobStatus, LogEntry, LogLevel};
use crate::error::{Error, Result};

use chrono::{Local, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Bounds on how many finished jobs are kept, and for how long.
///
/// Running jobs are never evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Jobs finished longer ago than this many seconds are dropped.
    pub max_age_secs: Option<u64>,
    /// Upper bound on the number of stored jobs.
    pub max_jobs: Option<usize>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_age_secs: Some(24 * 60 * 60),
            max_jobs: Some(1000),
        }
    }
}

impl RetentionPolicy {
    /// Keeps every job for the life of the process.
    pub fn unbounded() -> Self {
        Self {
            max_age_secs: None,
            max_jobs: None,
        }
    }

    /// Gets the maximum age of finished jobs.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_secs.map(Duration::from_secs)
    }
}

/// Thread-safe store of download jobs.
///
/// Each job has its own lock, so appends to one job never wait on another
/// job's writers.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, Arc<Mutex<DownloadJob>>>>,
    last_id: AtomicU64,
    retention: RetentionPolicy,
}

impl JobStore {
    /// Creates a store with the given retention policy.
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            last_id: AtomicU64::new(0),
            retention,
        }
    }

    /// Gets the retention policy.
    pub fn retention(&self) -> &RetentionPolicy {
        &self.retention
    }

    /// Registers a new running job and returns its identifier.
    pub fn create_job(&self) -> JobId {
        let id = self.next_id();
        let mut jobs = self.jobs.write();
        self.prune(&mut jobs);
        jobs.insert(id, Arc::new(Mutex::new(DownloadJob::new(id))));
        id
    }

    /// Appends a line to the log of job `id`.
    pub fn append(&self, id: JobId, level: LogLevel, message: impl Into<String>) -> Result<()> {
        let job = self.handle(id)?;
        let mut job = job.lock();
        // Stamped under the lock so the log stays in timestamp order.
        let entry = LogEntry::now(level, message);
        match level {
            LogLevel::Info => info!(job = %id, "{}", entry.message),
            LogLevel::Warn => warn!(job = %id, "{}", entry.message),
            LogLevel::Error => error!(job = %id, "{}", entry.message),
        }
        job.log.push(entry);
        Ok(())
    }

    /// Moves job `id` to its terminal `status`.
    ///
    /// Only the first transition out of `Running` is applied.
    pub fn finish(&self, id: JobId, status: JobStatus) -> Result<()> {
        let job = self.handle(id)?;
        let mut job = job.lock();
        if job.status == JobStatus::Running {
            job.status = status;
            job.finished_at = Some(Local::now());
        }
        Ok(())
    }

    /// Returns a snapshot of job `id`.
    pub fn get(&self, id: JobId) -> Result<DownloadJob> {
        Ok(self.handle(id)?.lock().clone())
    }

    /// Returns the log lines of job `id`.
    pub fn log(&self, id: JobId) -> Result<Vec<LogEntry>> {
        Ok(self.handle(id)?.lock().log.clone())
    }

    /// Number of stored jobs.
    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    /// Whether the store holds no job.
    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }

    fn handle(&self, id: JobId) -> Result<Arc<Mutex<DownloadJob>>> {
        self.jobs
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::JobNotFound { id: id.to_string() })
    }

    /// Millisecond timestamp, bumped past the previous id when needed.
    fn next_id(&self) -> JobId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = self.last_id.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match self
                .last_id
                .compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return JobId::new(next),
                Err(current) => last = current,
            }
        }
    }

    fn prune(&self, jobs: &mut HashMap<JobId, Arc<Mutex<DownloadJob>>>) {
        if let Some(max_age) = self
            .retention
            .max_age()
            .and_then(|d| chrono::Duration::from_std(d).ok())
        {
            let cutoff = Local::now() - max_age;
            jobs.retain(|_, job| {
                let job = job.lock();
                !job.finished_at.is_some_and(|at| at < cutoff)
            });
        }

        if let Some(max_jobs) = self.retention.max_jobs {
            // Room for the job about to be inserted.
            let excess = (jobs.len() + 1).saturating_sub(max_jobs);
            if excess > 0 {
                let mut finished: Vec<JobId> = jobs
                    .iter()
                    .filter(|(_, job)| job.lock().status.is_terminal())
                    .map(|(id, _)| *id)
                    .collect();
                finished.sort();
                for id in finished.into_iter().take(excess) {
                    jobs.remove(&id);
                }
            }
        }
    }
}
