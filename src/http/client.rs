//! HTTP client setup and middleware configuration.
//!
//! Every request issued by Quarry goes through a [`ClientWithMiddleware`]
//! carrying the tracing middleware. Clients never retry: the only failover in
//! the engine is the proxy list iteration.
//!
//! # Examples
//!
//! ```rust
//! use quarry::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client with Proxy
//!
//! ```rust,no_run
//! use quarry::http::{create_http_client, HttpClientConfig};
//! use reqwest::Proxy;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     proxy: Some(Proxy::all("http://proxy.example.com:8888")?),
//!     headers: None,
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Optional proxy every request is routed through.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

/// Creates an HTTP client with the tracing middleware.
///
/// Without a proxy the client connects directly and ignores proxies coming
/// from the environment, so a "direct" transport really is direct.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder();

    match config.proxy {
        Some(proxy) => inner_client_builder = inner_client_builder.proxy(proxy),
        None => inner_client_builder = inner_client_builder.no_proxy(),
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, USER_AGENT};

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_create_http_client_default() {
        let client = create_http_client(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_http_client_with_proxy_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("quarry-test"));

        let config = HttpClientConfig {
            proxy: Some(Proxy::all("http://127.0.0.1:8888").unwrap()),
            headers: Some(headers),
        };

        assert!(create_http_client(config).is_ok());
    }
}
