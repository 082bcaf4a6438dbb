use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate proxy, as listed in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    /// Host name or IP address.
    pub address: String,
    /// TCP port.
    pub port: u16,
}

impl ProxyEndpoint {
    /// Creates a new [`ProxyEndpoint`].
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Proxy URL understood by reqwest.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display_and_url() {
        let endpoint = ProxyEndpoint::new("proxy.corp", 8888);
        assert_eq!(endpoint.to_string(), "proxy.corp:8888");
        assert_eq!(endpoint.url(), "http://proxy.corp:8888");
    }
}
