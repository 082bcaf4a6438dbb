//! GED jar listing on the Nexus release and snapshot repositories.
//!
//! A Nexus project page links one sub-directory per version, each holding the
//! jar. Both repositories are internal and fetched without proxy.

use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::listing::VersionPageParser;

use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

/// One jar published on Nexus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GedJar {
    /// Absolute URL of the jar.
    pub url: String,
    /// File name of the jar.
    pub jar: String,
    /// Whether the jar comes from the snapshot repository.
    pub snapshot: bool,
}

impl GedJar {
    /// Describes the jar at `url`.
    ///
    /// The name is the last path segment, percent-decoded. A segment that does
    /// not decode to UTF-8 is kept as is.
    pub fn from_url(url: &str) -> Self {
        let name = url.rsplit('/').next().unwrap_or(url);
        let jar = urlencoding::decode(name)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| name.to_string());
        Self {
            url: url.to_string(),
            jar,
            snapshot: url.contains("snapshots"),
        }
    }
}

/// Lists the GED jars of the release and snapshot repositories.
#[derive(Debug)]
pub struct GedCatalog {
    releases_url: Option<String>,
    snapshots_url: Option<String>,
    fetcher: PageFetcher,
    parser: VersionPageParser,
}

impl GedCatalog {
    /// Creates a catalog. A repository left to `None` is skipped.
    pub fn new(
        releases_url: Option<String>,
        snapshots_url: Option<String>,
        fetcher: PageFetcher,
        parser: VersionPageParser,
    ) -> Self {
        Self {
            releases_url,
            snapshots_url,
            fetcher,
            parser,
        }
    }

    /// Lists the release jars followed by the snapshot jars.
    pub async fn list_ged_versions(&self) -> Result<Vec<GedJar>> {
        let (mut jars, snapshots) = futures::try_join!(
            self.list_repository(self.releases_url.as_deref()),
            self.list_repository(self.snapshots_url.as_deref()),
        )?;
        jars.extend(snapshots);
        Ok(jars)
    }

    async fn list_repository(&self, url: Option<&str>) -> Result<Vec<GedJar>> {
        let Some(url) = url else {
            return Ok(Vec::new());
        };

        let body = self.fetcher.fetch(url, None).await?;
        let links = self.parser.sub_version_links(url, &body);
        debug!(url, count = links.len(), "GED versions listed");

        try_join_all(links.iter().map(|link| self.find_jar(link))).await
    }

    async fn find_jar(&self, version_url: &str) -> Result<GedJar> {
        let page = self.fetcher.fetch(&format!("{version_url}/"), None).await?;
        let jar_url = self
            .parser
            .first_jar_link(&page)
            .ok_or_else(|| Error::ArtifactNotFound {
                artifact: version_url.to_string(),
            })?;
        Ok(GedJar::from_url(&jar_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jar_from_release_url() {
        let jar = GedJar::from_url("https://nexus.local/repositories/releases/ged/1.0/ged-web-front-1.0.jar");
        assert_eq!(jar.jar, "ged-web-front-1.0.jar");
        assert!(!jar.snapshot);
    }

    #[test]
    fn test_jar_from_snapshot_url() {
        let jar = GedJar::from_url(
            "https://nexus.local/repositories/snapshots/ged/1.1-SNAPSHOT/ged-web-front-1.1-20240101.jar",
        );
        assert_eq!(jar.jar, "ged-web-front-1.1-20240101.jar");
        assert!(jar.snapshot);
    }

    #[test]
    fn test_jar_name_keeps_build_metadata() {
        let jar = GedJar::from_url("https://nexus.local/releases/ged/1.0/ged-1.0+b1.jar");
        assert_eq!(jar.jar, "ged-1.0+b1.jar");
    }

    #[test]
    fn test_jar_name_keeps_query_characters() {
        let jar = GedJar::from_url("https://nexus.local/releases/ged/1.0/ged=x&y.jar");
        assert_eq!(jar.jar, "ged=x&y.jar");
    }

    #[test]
    fn test_jar_name_is_decoded() {
        let jar = GedJar::from_url("https://nexus.local/releases/ged%20web-1.0.jar");
        assert_eq!(jar.jar, "ged web-1.0.jar");
    }
}
