use crate::artifact::{ArtifactSpec, ArtifactVersionSet, Presence, VersionString};
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::listing::VersionPageParser;
use crate::proxy::{ProxyEndpoint, ProxySelector, ProxyTransport};

use futures::future::try_join_all;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Enumerates the versions of artifacts and checks their presence.
///
/// Every request selects a fresh proxy transport.
#[derive(Debug)]
pub struct ArtifactVersionIndex {
    repository_url: String,
    proxies: Vec<ProxyEndpoint>,
    selector: ProxySelector,
    fetcher: PageFetcher,
    parser: VersionPageParser,
}

impl ArtifactVersionIndex {
    /// Creates an index over the repository at `repository_url`.
    pub fn new(
        repository_url: impl Into<String>,
        proxies: Vec<ProxyEndpoint>,
        selector: ProxySelector,
        fetcher: PageFetcher,
        parser: VersionPageParser,
    ) -> Self {
        let repository_url = repository_url.into().trim_end_matches('/').to_string();
        Self {
            repository_url,
            proxies,
            selector,
            fetcher,
            parser,
        }
    }

    /// Gets the repository base URL, without trailing slash.
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Gets the page fetcher.
    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }

    /// Gets the listing parser.
    pub fn parser(&self) -> &VersionPageParser {
        &self.parser
    }

    /// URL of the listing page of `artifact`.
    pub fn artifact_url(&self, artifact: &ArtifactSpec) -> String {
        format!("{}/{}", self.repository_url, artifact)
    }

    /// URL of the listing page of `artifact` at `version`.
    pub fn version_url(&self, artifact: &ArtifactSpec, version: &str) -> String {
        format!("{}/{}/{}", self.repository_url, artifact, version)
    }

    /// Selects a fresh transport through the configured proxies.
    pub async fn transport(&self) -> Result<ProxyTransport> {
        self.selector.select(&self.proxies).await
    }

    /// Lists the versions directories of `artifact`.
    pub async fn list_versions(&self, artifact: &ArtifactSpec) -> Result<Vec<VersionString>> {
        let transport = self.transport().await?;
        let body = self
            .fetcher
            .fetch(&self.artifact_url(artifact), Some(&transport))
            .await?;
        let versions = self.parser.produce_version_list(&body);
        debug!(%artifact, count = versions.len(), "Versions listed");
        Ok(versions)
    }

    /// Checks whether the file of `artifact` exists at `version`.
    pub async fn check_presence(&self, artifact: &ArtifactSpec, version: &str) -> Result<Presence> {
        let transport = self.transport().await?;
        let body = self
            .fetcher
            .fetch(&self.version_url(artifact, version), Some(&transport))
            .await?;
        Ok(Presence {
            artifact: artifact.clone(),
            version: version.to_string(),
            available: self.parser.artifact_exists(artifact.name(), &body),
        })
    }

    /// Checks every artifact at a single version, concurrently.
    pub async fn check_version(
        &self,
        version: &str,
        artifacts: &[ArtifactSpec],
    ) -> Result<Vec<Presence>> {
        try_join_all(artifacts.iter().map(|a| self.check_presence(a, version))).await
    }

    /// Builds the version set of every artifact.
    ///
    /// All presence checks are issued at once and all must succeed: a single
    /// failed fetch fails the whole discovery.
    pub async fn discover_all(&self, artifacts: &[ArtifactSpec]) -> Result<Vec<ArtifactVersionSet>> {
        let listed = try_join_all(artifacts.iter().map(|a| async move {
            let versions = self.list_versions(a).await?;
            Ok::<_, crate::Error>((a, versions))
        }))
        .await?;

        let checks = listed
            .iter()
            .flat_map(|(a, versions)| versions.iter().map(move |v| self.check_presence(a, v)));
        let presences = try_join_all(checks).await?;

        let mut sets: BTreeMap<&ArtifactSpec, ArtifactVersionSet> = artifacts
            .iter()
            .map(|a| (a, ArtifactVersionSet::new(a.clone(), Vec::<String>::new())))
            .collect();
        for presence in presences.into_iter().filter(|p| p.available) {
            if let Some(set) = sets.get_mut(&presence.artifact) {
                set.versions.insert(presence.version);
            }
        }

        info!(artifacts = artifacts.len(), "Discovery complete");
        Ok(sets.into_values().collect())
    }
}
