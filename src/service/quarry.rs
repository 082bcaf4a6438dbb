//! The caller-facing entry point.

use super::config::QuarryConfig;
use crate::artifact::{ArtifactSpec, ArtifactVersionSet, VersionString};
use crate::completeness::complete_versions;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::ged::{GedCatalog, GedJar};
use crate::index::ArtifactVersionIndex;
use crate::jobs::{DownloadJob, JobId, JobStore, LogEntry};
use crate::listing::VersionPageParser;
use crate::orchestrator::DownloadOrchestrator;
use crate::proxy::{ProxyProbe, ProxySelector};

use reqwest::header::HeaderMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Discovers complete versions and runs download jobs.
///
/// Built with [`QuarryBuilder`](super::QuarryBuilder):
///
/// ```rust
/// use quarry::service::QuarryBuilder;
///
/// # fn example() -> Result<(), quarry::Error> {
/// let quarry = QuarryBuilder::new()
///     .repository_url("http://repo.corp/artifactory/webrc")
///     .artifact("webrc-front-ws-ear")
///     .build()?;
/// assert_eq!(quarry.config().artifacts.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Quarry {
    config: Arc<QuarryConfig>,
    index: Arc<ArtifactVersionIndex>,
    ged: Arc<GedCatalog>,
    jobs: Arc<JobStore>,
    orchestrator: DownloadOrchestrator,
}

impl Quarry {
    pub(crate) fn new(
        config: QuarryConfig,
        probe: Arc<dyn ProxyProbe>,
        headers: Option<HeaderMap>,
    ) -> Result<Self> {
        config.validate()?;

        let parser = VersionPageParser::new(config.artifact_extension.clone());
        let mut selector = ProxySelector::new(probe, config.probe_timeout());
        if let Some(ref h) = headers {
            selector = selector.with_headers(h.to_owned());
        }

        let index = Arc::new(ArtifactVersionIndex::new(
            config.repository_url.clone(),
            config.proxies.clone(),
            selector,
            PageFetcher::new(headers.clone())?,
            parser.clone(),
        ));
        let ged = Arc::new(GedCatalog::new(
            config.ged_releases_url.clone(),
            config.ged_snapshots_url.clone(),
            PageFetcher::new(headers)?,
            parser,
        ));
        let jobs = Arc::new(JobStore::new(config.retention));
        let orchestrator = DownloadOrchestrator::new(
            index.clone(),
            jobs.clone(),
            config.artifacts.clone(),
            config.download_root.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            index,
            ged,
            jobs,
            orchestrator,
        })
    }

    /// Gets the configuration.
    pub fn config(&self) -> &QuarryConfig {
        &self.config
    }

    /// Gets the version index.
    pub fn index(&self) -> &ArtifactVersionIndex {
        &self.index
    }

    /// Gets the job store.
    pub fn jobs(&self) -> &Arc<JobStore> {
        &self.jobs
    }

    /// Runs a full discovery pass over the configured artifacts.
    pub async fn discover(&self) -> Result<Vec<ArtifactVersionSet>> {
        self.index.discover_all(&self.config.artifacts).await
    }

    /// Lists, sorted, the versions in which every configured artifact exists.
    pub async fn list_complete_versions(&self) -> Result<Vec<VersionString>> {
        let sets = self.discover().await?;
        let required: BTreeSet<ArtifactSpec> = self.config.artifacts.iter().cloned().collect();
        let complete = complete_versions(&sets, &required);
        info!(count = complete.len(), "Complete versions found");
        Ok(complete.into_iter().collect())
    }

    /// Lists the GED jars, releases first.
    pub async fn list_ged_versions(&self) -> Result<Vec<GedJar>> {
        self.ged.list_ged_versions().await
    }

    /// Accepts a download of `version_from` saved as `version_to`.
    ///
    /// See [`DownloadOrchestrator::request_download`].
    pub async fn request_download(&self, version_from: &str, version_to: &str) -> Result<JobId> {
        self.orchestrator.request_download(version_from, version_to).await
    }

    /// Accepts a download of `version`, saved under the same label.
    pub async fn request_download_same(&self, version: &str) -> Result<JobId> {
        self.orchestrator.request_download_same(version).await
    }

    /// Gets the log lines of a job.
    pub fn job_log(&self, id: JobId) -> Result<Vec<LogEntry>> {
        self.jobs.log(id)
    }

    /// Gets a snapshot of a job.
    pub fn job(&self, id: JobId) -> Result<DownloadJob> {
        self.jobs.get(id)
    }
}
