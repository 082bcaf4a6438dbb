//! Selection of the first reachable proxy.

use super::{ProxyEndpoint, ProxyProbe, ProxyTransport, TcpProbe};
use crate::error::{Error, Result};

use reqwest::header::HeaderMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Time allowed for a single reachability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Picks the first reachable proxy of an ordered candidate list.
///
/// Nothing is remembered between calls: every call probes the list again
/// from its first candidate.
#[derive(Clone)]
pub struct ProxySelector {
    probe: Arc<dyn ProxyProbe>,
    timeout: Duration,
    headers: Option<HeaderMap>,
}

impl fmt::Debug for ProxySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySelector")
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .finish()
    }
}

impl Default for ProxySelector {
    fn default() -> Self {
        Self::new(Arc::new(TcpProbe), DEFAULT_PROBE_TIMEOUT)
    }
}

impl ProxySelector {
    /// Creates a selector using `probe` with the given per-probe timeout.
    pub fn new(probe: Arc<dyn ProxyProbe>, timeout: Duration) -> Self {
        Self {
            probe,
            timeout,
            headers: None,
        }
    }

    /// Sets the default headers of the transports this selector creates.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Gets the per-probe timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a transport bound to the first candidate whose probe succeeds.
    ///
    /// Each candidate is probed at most once. Fails with
    /// [`Error::NoProxyConfigured`] for an empty list and with
    /// [`Error::NoProxyAvailable`] when every probe failed.
    pub async fn select(&self, candidates: &[ProxyEndpoint]) -> Result<ProxyTransport> {
        if candidates.is_empty() {
            return Err(Error::NoProxyConfigured);
        }

        for candidate in candidates {
            match self.probe.probe(candidate, self.timeout).await {
                Ok(()) => {
                    debug!(proxy = %candidate, "Proxy found");
                    return ProxyTransport::through(candidate, self.headers.clone());
                }
                Err(e) => {
                    warn!(proxy = %candidate, error = %e, "Unable to contact proxy");
                }
            }
        }

        Err(Error::NoProxyAvailable)
    }
}
