//! Error handling for the Quarry library.
//!
//! Every failure the discovery and download engine can report is a variant of
//! [`Error`]. Synchronous callers (discovery, download acceptance) receive
//! these directly; the background transfer phase only records them in the job
//! log.

use std::io;
use thiserror::Error;

/// Errors that can happen when using Quarry.
#[derive(Error, Debug)]
pub enum Error {
    /// The proxy candidate list is empty.
    #[error("No proxy configured")]
    NoProxyConfigured,

    /// Every proxy candidate failed its reachability probe.
    #[error("No available proxy found")]
    NoProxyAvailable,

    /// A page could not be retrieved, either because of a transport error or
    /// because the server answered with something other than `200 OK`.
    #[error("Error while calling url: {url}")]
    FetchFailed { url: String },

    /// The artifact file name could not be located on its version page.
    #[error("Unable to find the file name of artifact {artifact}")]
    ArtifactNotFound { artifact: String },

    /// Some required artifacts are missing for the requested version.
    #[error("Some artifacts are missing: {}", .missing.join(", "))]
    IncompleteVersion { missing: Vec<String> },

    /// No job is registered under this identifier.
    #[error("Unknown job: {id}")]
    JobNotFound { id: String },

    /// The configuration is incomplete or could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Raised by job directory creation and by writing downloaded files.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library, raised while building HTTP clients.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a Quarry error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_version_lists_missing_artifacts() {
        let err = Error::IncompleteVersion {
            missing: vec!["a-ear".to_string(), "b-ear".to_string()],
        };
        assert_eq!(err.to_string(), "Some artifacts are missing: a-ear, b-ear");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::IOError { .. }));
    }
}
