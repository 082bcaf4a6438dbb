use crate::artifact::ArtifactSpec;
use crate::completeness::missing_artifacts;
use crate::error::{Error, Result};
use crate::index::ArtifactVersionIndex;
use crate::jobs::{JobId, JobStatus, JobStore, LogLevel};

use futures::future::join_all;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, warn};

/// Validates download requests and drives the background transfers.
///
/// Cloning is cheap; clones share the index and the job store.
#[derive(Debug, Clone)]
pub struct DownloadOrchestrator {
    index: Arc<ArtifactVersionIndex>,
    jobs: Arc<JobStore>,
    artifacts: Arc<[ArtifactSpec]>,
    download_root: PathBuf,
}

impl DownloadOrchestrator {
    /// Creates an orchestrator downloading `artifacts` below `download_root`.
    ///
    /// `download_root` must exist before the first job starts.
    pub fn new(
        index: Arc<ArtifactVersionIndex>,
        jobs: Arc<JobStore>,
        artifacts: Vec<ArtifactSpec>,
        download_root: PathBuf,
    ) -> Self {
        Self {
            index,
            jobs,
            artifacts: artifacts.into(),
            download_root,
        }
    }

    /// Gets the job store.
    pub fn jobs(&self) -> &Arc<JobStore> {
        &self.jobs
    }

    /// Gets the directory holding the job directories.
    pub fn download_root(&self) -> &Path {
        &self.download_root
    }

    /// Accepts a download of `version_from`, saved under the `version_to`
    /// label, and returns the job identifier once the transfers are started.
    ///
    /// Fails with [`Error::IncompleteVersion`] without creating any job when a
    /// required artifact is missing at `version_from`. Transfer failures are
    /// only visible in the job log and status.
    pub async fn request_download(&self, version_from: &str, version_to: &str) -> Result<JobId> {
        let presences = self.index.check_version(version_from, &self.artifacts).await?;
        let required: BTreeSet<ArtifactSpec> = self.artifacts.iter().cloned().collect();
        let missing = missing_artifacts(&presences, &required);
        if !missing.is_empty() {
            warn!(version = version_from, ?missing, "Download refused, version incomplete");
            return Err(Error::IncompleteVersion { missing });
        }

        let id = self.jobs.create_job();
        self.record(
            id,
            LogLevel::Info,
            format!("All artifacts are available for version {version_from}"),
        );

        let dir = self.download_root.join(id.to_string());
        self.record(id, LogLevel::Info, format!("Creating download directory {}", dir.display()));
        if let Err(e) = fs::create_dir(&dir).await {
            self.record(
                id,
                LogLevel::Error,
                format!("Unable to create download directory {}: {}", dir.display(), e),
            );
            self.jobs.finish(id, JobStatus::Failed)?;
            return Err(e.into());
        }

        let this = self.clone();
        let version_from = version_from.to_string();
        let version_to = version_to.to_string();
        tokio::spawn(async move {
            this.run(id, &version_from, &version_to, &dir).await;
        });

        Ok(id)
    }

    /// Same as [`request_download`](Self::request_download), keeping the
    /// source version as the label.
    pub async fn request_download_same(&self, version: &str) -> Result<JobId> {
        self.request_download(version, version).await
    }

    async fn run(&self, id: JobId, version_from: &str, version_to: &str, dir: &Path) {
        self.record(id, LogLevel::Info, "Download started");

        let results = join_all(
            self.artifacts
                .iter()
                .map(|a| self.transfer(id, a, version_from, version_to, dir)),
        )
        .await;

        let total = results.len();
        let failed = results.iter().filter(|r| r.is_err()).count();
        let status = if failed == 0 {
            self.record(id, LogLevel::Info, format!("All {total} artifacts downloaded"));
            JobStatus::Succeeded
        } else {
            self.record(id, LogLevel::Error, format!("{failed} of {total} downloads failed"));
            JobStatus::Failed
        };

        if let Err(e) = self.jobs.finish(id, status) {
            warn!(job = %id, error = %e, "Unable to set final job status");
        }
    }

    /// Downloads one artifact; failures are recorded before being returned.
    async fn transfer(
        &self,
        id: JobId,
        artifact: &ArtifactSpec,
        version_from: &str,
        version_to: &str,
        dir: &Path,
    ) -> Result<u64> {
        let result = self
            .transfer_inner(id, artifact, version_from, version_to, dir)
            .await;
        if let Err(ref e) = result {
            self.record(id, LogLevel::Error, format!("Download failed for {artifact}: {e}"));
        }
        result
    }

    async fn transfer_inner(
        &self,
        id: JobId,
        artifact: &ArtifactSpec,
        version_from: &str,
        version_to: &str,
        dir: &Path,
    ) -> Result<u64> {
        let transport = self.index.transport().await?;
        if let Some(endpoint) = transport.endpoint() {
            self.record(id, LogLevel::Info, format!("Using proxy {endpoint} for {artifact}"));
        }

        let page_url = self.index.version_url(artifact, version_from);
        self.record(id, LogLevel::Info, format!("Fetching {page_url}"));
        let body = self.index.fetcher().fetch(&page_url, Some(&transport)).await?;

        let parser = self.index.parser();
        let file = parser
            .find_artifact_link(artifact.name(), &body)
            .ok_or_else(|| Error::ArtifactNotFound {
                artifact: artifact.to_string(),
            })?;

        let file_url = if file.starts_with("http://") || file.starts_with("https://") {
            file.clone()
        } else {
            format!("{page_url}/{file}")
        };
        let local = dir.join(format!("{}-{}.{}", artifact, version_to, parser.extension()));
        debug!(job = %id, url = %file_url, path = ?local, "Transferring");

        let size = self
            .index
            .fetcher()
            .download_to(&file_url, Some(&transport), &local)
            .await?;
        self.record(
            id,
            LogLevel::Info,
            format!("Download completed for '{file}' ({size} bytes)"),
        );
        Ok(size)
    }

    fn record(&self, id: JobId, level: LogLevel, message: impl Into<String>) {
        if let Err(e) = self.jobs.append(id, level, message) {
            warn!(job = %id, error = %e, "Unable to record job log line");
        }
    }
}
