//! Builder pattern implementation for creating [`Quarry`] instances.
//!
//! ```rust
//! use quarry::proxy::ProxyEndpoint;
//! use quarry::service::QuarryBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), quarry::Error> {
//! let quarry = QuarryBuilder::new()
//!     .repository_url("http://repo.corp/artifactory/webrc")
//!     .artifacts(["webrc-front-ws-ear", "webrc-back-ws-ear"])
//!     .proxy(ProxyEndpoint::new("proxy-a.corp", 8888))
//!     .proxy(ProxyEndpoint::new("proxy-b.corp", 8888))
//!     .probe_timeout(Duration::from_secs(2))
//!     .download_root("/var/lib/quarry/dl".into())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::QuarryConfig, quarry::Quarry};
use crate::artifact::ArtifactSpec;
use crate::error::Result;
use crate::jobs::RetentionPolicy;
use crate::proxy::{ProxyEndpoint, ProxyProbe, TcpProbe};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Quarry`].
#[derive(Default)]
pub struct QuarryBuilder {
    config: QuarryConfig,
    probe: Option<Arc<dyn ProxyProbe>>,
    headers: Option<HeaderMap>,
}

impl QuarryBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        QuarryBuilder::default()
    }

    /// Starts from an existing configuration, e.g. one loaded from TOML.
    pub fn from_config(config: QuarryConfig) -> Self {
        QuarryBuilder {
            config,
            ..QuarryBuilder::default()
        }
    }

    /// Sets the repository base URL.
    pub fn repository_url(mut self, url: impl Into<String>) -> Self {
        self.config.repository_url = url.into();
        self
    }

    /// Adds a required artifact.
    pub fn artifact(mut self, artifact: impl Into<ArtifactSpec>) -> Self {
        self.config.artifacts.push(artifact.into());
        self
    }

    /// Adds several required artifacts.
    pub fn artifacts<I, A>(mut self, artifacts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ArtifactSpec>,
    {
        self.config
            .artifacts
            .extend(artifacts.into_iter().map(Into::into));
        self
    }

    /// Sets the artifact file extension, without the dot.
    pub fn artifact_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.artifact_extension = extension.into();
        self
    }

    /// Appends a proxy candidate; candidates are probed in insertion order.
    pub fn proxy(mut self, endpoint: ProxyEndpoint) -> Self {
        self.config.proxies.push(endpoint);
        self
    }

    /// Replaces the proxy candidates.
    pub fn proxies(mut self, proxies: Vec<ProxyEndpoint>) -> Self {
        self.config.proxies = proxies;
        self
    }

    /// Sets the timeout of a single proxy probe.
    ///
    /// Sub-second parts are rounded up to the next second.
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.config.probe_timeout_secs = secs;
        self
    }

    /// Replaces the reachability probe, [`TcpProbe`] by default.
    pub fn probe(mut self, probe: Arc<dyn ProxyProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Sets the Nexus project page of the GED releases.
    pub fn ged_releases_url(mut self, url: impl Into<String>) -> Self {
        self.config.ged_releases_url = Some(url.into());
        self
    }

    /// Sets the Nexus project page of the GED snapshots.
    pub fn ged_snapshots_url(mut self, url: impl Into<String>) -> Self {
        self.config.ged_snapshots_url = Some(url.into());
        self
    }

    /// Sets the directory where job directories are created.
    pub fn download_root(mut self, directory: PathBuf) -> Self {
        self.config.download_root = directory;
        self
    }

    /// Sets the retention of finished jobs.
    pub fn retention(mut self, retention: RetentionPolicy) -> Self {
        self.config.retention = retention;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers sent with every request.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.headers = Some(new);
        self
    }

    /// Add one http header sent with every request.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.headers = Some(new);
        self
    }

    /// Validates the configuration and creates the [`Quarry`].
    pub fn build(self) -> Result<Quarry> {
        let probe = self.probe.unwrap_or_else(|| Arc::new(TcpProbe));
        Quarry::new(self.config, probe, self.headers)
    }
}
