//! Proxy failover.
//!
//! The repository is only reachable through a list of corporate proxies, any
//! of which may be down. Each top-level operation asks the [`ProxySelector`]
//! for a fresh [`ProxyTransport`]; the selector probes the candidates in
//! order and binds the transport to the first one that answers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use quarry::proxy::{ProxyEndpoint, ProxySelector};
//!
//! # async fn example() -> Result<(), quarry::Error> {
//! let candidates = vec![
//!     ProxyEndpoint::new("proxy-a.corp", 8888),
//!     ProxyEndpoint::new("proxy-b.corp", 8888),
//! ];
//! let transport = ProxySelector::default().select(&candidates).await?;
//! println!("Using {:?}", transport.endpoint());
//! # Ok(())
//! # }
//! ```

pub mod endpoint;
pub mod probe;
pub mod selector;
pub mod transport;

pub use endpoint::ProxyEndpoint;
pub use probe::{ProxyProbe, TcpProbe};
pub use selector::{ProxySelector, DEFAULT_PROBE_TIMEOUT};
pub use transport::ProxyTransport;
