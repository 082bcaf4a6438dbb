//! Caller-facing service.
//!
//! [`Quarry`] wires the proxy selector, the page fetcher, the version index,
//! the job store and the download orchestrator together and exposes the
//! operations consumed by a REST layer:
//!
//! - [`Quarry::list_complete_versions`]
//! - [`Quarry::list_ged_versions`]
//! - [`Quarry::request_download`]
//! - [`Quarry::job_log`]
//!
//! - `config` - [`QuarryConfig`], loadable from TOML
//! - `builder` - [`QuarryBuilder`]
//! - `quarry` - [`Quarry`]

pub mod builder;
pub mod config;
pub mod quarry;

pub use builder::QuarryBuilder;
pub use config::QuarryConfig;
pub use quarry::Quarry;
