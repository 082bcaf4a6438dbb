//! Single-page retrieval and file streaming.
//!
//! [`PageFetcher`] issues one GET per call, optionally through a
//! [`ProxyTransport`](crate::proxy::ProxyTransport). Anything but `200 OK` is a
//! failure; there are no retries and no caching.

pub mod fetcher;

pub use fetcher::PageFetcher;
