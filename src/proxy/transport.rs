use super::ProxyEndpoint;
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;

/// An HTTP client bound to zero or one proxy.
///
/// A transport belongs to the operation that selected it and is dropped with
/// it. It is deliberately not `Clone`.
pub struct ProxyTransport {
    client: ClientWithMiddleware,
    endpoint: Option<ProxyEndpoint>,
}

impl fmt::Debug for ProxyTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ProxyTransport {
    /// Creates a transport connecting directly, without proxy.
    pub fn direct(headers: Option<HeaderMap>) -> Result<Self> {
        let client = create_http_client(HttpClientConfig {
            proxy: None,
            headers,
        })?;
        Ok(Self {
            client,
            endpoint: None,
        })
    }

    /// Creates a transport routing every request through `endpoint`.
    pub fn through(endpoint: &ProxyEndpoint, headers: Option<HeaderMap>) -> Result<Self> {
        let proxy = Proxy::all(endpoint.url())?;
        let client = create_http_client(HttpClientConfig {
            proxy: Some(proxy),
            headers,
        })?;
        Ok(Self {
            client,
            endpoint: Some(endpoint.clone()),
        })
    }

    /// Gets the proxy this transport is bound to, if any.
    pub fn endpoint(&self) -> Option<&ProxyEndpoint> {
        self.endpoint.as_ref()
    }

    /// Gets the underlying HTTP client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_transport_has_no_endpoint() {
        let transport = ProxyTransport::direct(None).unwrap();
        assert!(transport.endpoint().is_none());
    }

    #[test]
    fn test_transport_through_endpoint() {
        let endpoint = ProxyEndpoint::new("127.0.0.1", 3128);
        let transport = ProxyTransport::through(&endpoint, None).unwrap();
        assert_eq!(transport.endpoint(), Some(&endpoint));
        assert!(format!("{:?}", transport).contains("3128"));
    }
}
