//! Download orchestration.
//!
//! A download request is accepted only once every required artifact has been
//! found at the source version. The transfers then run in the background and
//! report exclusively through the job log and the job status:
//!
//! ```text
//! Validating --(all present)--> Running --(all transfers ok)--> Succeeded
//!     |                            \---(any transfer failed)--> Failed
//!     \--(missing artifacts)--> IncompleteVersion, no job
//! ```

pub mod orchestrator;

pub use orchestrator::DownloadOrchestrator;
