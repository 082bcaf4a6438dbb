//! Download jobs and their audit logs.
//!
//! A [`JobStore`] owns every [`DownloadJob`]. Jobs are only mutated by
//! appending [`LogEntry`] records and by their single terminal status
//! transition. Appends to one job are serialized, so the log order is the
//! call order even when several transfers of the same job log concurrently.
//!
//! # Examples
//!
//! ```rust
//! use quarry::jobs::{JobStatus, JobStore, LogLevel};
//!
//! # fn example() -> Result<(), quarry::Error> {
//! let store = JobStore::default();
//! let id = store.create_job();
//! store.append(id, LogLevel::Info, "Download started")?;
//! store.finish(id, JobStatus::Succeeded)?;
//!
//! let job = store.get(id)?;
//! assert_eq!(job.status, JobStatus::Succeeded);
//! assert_eq!(job.log.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod job;
pub mod store;

pub use entry::{LogEntry, LogLevel};
pub use job::{DownloadJob, JobId, JobStatus};
pub use store::{JobStore, RetentionPolicy};
