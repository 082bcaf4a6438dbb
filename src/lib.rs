//! Quarry finds the versions of a set of artifacts that are complete in a
//! remote repository reachable only through unreliable proxies, and downloads
//! them asynchronously.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use quarry::{proxy::ProxyEndpoint, QuarryBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let quarry = QuarryBuilder::new()
//!     .repository_url("http://repo.corp/artifactory/webrc")
//!     .artifacts(["webrc-front-ws-ear", "webrc-back-ws-ear"])
//!     .proxy(ProxyEndpoint::new("proxy-a.corp", 8888))
//!     .build()?;
//!
//! let versions = quarry.list_complete_versions().await?;
//! if let Some(latest) = versions.last() {
//!     let job = quarry.request_download(latest, latest).await?;
//!     println!("Job {job} started");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`listing`] - Version and artifact extraction from listing pages
//! - [`proxy`] - Proxy candidates, reachability probes and failover
//! - [`http`] - HTTP client construction
//! - [`fetch`] - Single-page retrieval and file streaming
//! - [`index`] - Per-artifact version discovery and presence checks
//! - [`completeness`] - Aggregation into complete versions
//! - [`jobs`] - Download jobs and their audit logs
//! - [`orchestrator`] - Download validation and background transfers
//! - [`ged`] - GED jar listing on Nexus
//! - [`service`] - The [`Quarry`] facade, its builder and configuration
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod artifact;
pub mod completeness;
pub mod error;
pub mod fetch;
pub mod ged;
pub mod http;
pub mod index;
pub mod jobs;
pub mod listing;
pub mod orchestrator;
pub mod proxy;
pub mod service;

pub use artifact::{ArtifactSpec, ArtifactVersionSet, CompleteVersionSet, Presence, VersionString};
pub use completeness::{complete_versions, missing_artifacts};
pub use error::{Error, Result};
pub use fetch::PageFetcher;
pub use ged::{GedCatalog, GedJar};
pub use http::{create_http_client, HttpClientConfig};
pub use index::ArtifactVersionIndex;
pub use jobs::{DownloadJob, JobId, JobStatus, JobStore, LogEntry, LogLevel, RetentionPolicy};
pub use listing::VersionPageParser;
pub use orchestrator::DownloadOrchestrator;
pub use proxy::{ProxyEndpoint, ProxyProbe, ProxySelector, ProxyTransport, TcpProbe};
pub use service::{Quarry, QuarryBuilder, QuarryConfig};
