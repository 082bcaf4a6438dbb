//! Configuration of a [`Quarry`](super::Quarry) instance.
//!
//! The configuration is usually loaded from TOML:
//!
//! ```rust
//! use quarry::service::QuarryConfig;
//!
//! # fn example() -> Result<(), quarry::Error> {
//! let config = QuarryConfig::from_toml_str(r#"
//!     repository_url = "http://repo.corp/artifactory/webrc"
//!     artifacts = ["webrc-front-ws-ear", "webrc-back-ws-ear"]
//!     download_root = "/var/lib/quarry/dl"
//!
//!     [[proxies]]
//!     address = "proxy-a.corp"
//!     port = 8888
//! "#)?;
//! assert_eq!(config.artifacts.len(), 2);
//! assert_eq!(config.artifact_extension, "ear");
//! # Ok(())
//! # }
//! ```

use crate::artifact::ArtifactSpec;
use crate::error::{Error, Result};
use crate::jobs::RetentionPolicy;
use crate::listing::DEFAULT_EXTENSION;
use crate::proxy::{ProxyEndpoint, DEFAULT_PROBE_TIMEOUT};

use reqwest::Url;
use serde::Deserialize;
use std::env::current_dir;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Static configuration of the discovery and download engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    /// Proxy candidates, in probe order.
    pub proxies: Vec<ProxyEndpoint>,
    /// Base URL of the artifact repository.
    pub repository_url: String,
    /// Artifacts that must all be present for a version to be complete.
    pub artifacts: Vec<ArtifactSpec>,
    /// Extension of the artifact files, without the dot.
    pub artifact_extension: String,
    /// Nexus project page of the GED releases.
    pub ged_releases_url: Option<String>,
    /// Nexus project page of the GED snapshots.
    pub ged_snapshots_url: Option<String>,
    /// Directory receiving one sub-directory per download job.
    pub download_root: PathBuf,
    /// Timeout of a single proxy probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Retention of finished jobs.
    pub retention: RetentionPolicy,
}

impl Default for QuarryConfig {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            repository_url: String::new(),
            artifacts: Vec::new(),
            artifact_extension: DEFAULT_EXTENSION.to_string(),
            ged_releases_url: None,
            ged_snapshots_url: None,
            download_root: current_dir().unwrap_or_default().join("dl"),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT.as_secs(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl QuarryConfig {
    /// Parses a TOML document. Missing keys take their default value.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Gets the proxy probe timeout.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Checks the settings every operation relies on.
    ///
    /// An empty proxy list is accepted here; it is reported as
    /// [`Error::NoProxyConfigured`] by the operations needing a proxy.
    pub fn validate(&self) -> Result<()> {
        if self.repository_url.trim().is_empty() {
            return Err(Error::InvalidConfig("repository_url is empty".into()));
        }
        Url::parse(&self.repository_url).map_err(|e| {
            Error::InvalidUrl(format!(
                "The url \"{}\" cannot be parsed: {}",
                self.repository_url, e
            ))
        })?;
        if self.artifacts.is_empty() {
            return Err(Error::InvalidConfig("no artifact configured".into()));
        }
        if self.artifact_extension.is_empty() {
            return Err(Error::InvalidConfig("artifact_extension is empty".into()));
        }
        if self.probe_timeout_secs == 0 {
            return Err(Error::InvalidConfig("probe_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}
