use crate::error::{Error, Result};
use crate::proxy::ProxyTransport;

use futures::StreamExt;
use reqwest::{header::HeaderMap, Response, StatusCode};
use std::fmt;
use std::path::Path;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, warn};

/// Performs HTTP GETs, directly or through a proxy transport.
pub struct PageFetcher {
    direct: ProxyTransport,
}

impl fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageFetcher").finish_non_exhaustive()
    }
}

impl PageFetcher {
    /// Creates a fetcher. `headers` are applied to direct requests.
    pub fn new(headers: Option<HeaderMap>) -> Result<Self> {
        Ok(Self {
            direct: ProxyTransport::direct(headers)?,
        })
    }

    /// Fetches `url` and returns its body.
    ///
    /// Without `transport` the request goes out directly, which is meant for
    /// internal endpoints.
    pub async fn fetch(&self, url: &str, transport: Option<&ProxyTransport>) -> Result<String> {
        let res = self.get(url, transport).await?;
        res.text().await.map_err(|e| {
            warn!(url, error = %e, "Unable to read response body");
            Error::FetchFailed {
                url: url.to_string(),
            }
        })
    }

    /// Streams `url` into a new file at `path` and returns the number of bytes
    /// written.
    pub async fn download_to(
        &self,
        url: &str,
        transport: Option<&ProxyTransport>,
        path: &Path,
    ) -> Result<u64> {
        let res = self.get(url, transport).await?;

        debug!("Creating destination file {:?}", path);
        let mut file = File::create(path).await?;
        let mut size: u64 = 0;

        debug!("Retrieving chunks...");
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item.map_err(|e| {
                warn!(url, error = %e, "Transfer interrupted");
                Error::FetchFailed {
                    url: url.to_string(),
                }
            })?;
            size += chunk.len() as u64;
            file.write_all_buf(&mut chunk).await?;
        }
        file.flush().await?;

        Ok(size)
    }

    async fn get(&self, url: &str, transport: Option<&ProxyTransport>) -> Result<Response> {
        let transport = transport.unwrap_or(&self.direct);
        debug!(url, proxy = ?transport.endpoint(), "Fetching");

        let res = transport.client().get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Request failed");
            Error::FetchFailed {
                url: url.to_string(),
            }
        })?;

        if res.status() != StatusCode::OK {
            warn!(url, status = %res.status(), "Unexpected status");
            return Err(Error::FetchFailed {
                url: url.to_string(),
            });
        }

        Ok(res)
    }
}
