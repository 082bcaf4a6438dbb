//! Artifact and version types shared by discovery and download.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A version token taken verbatim from a listing page.
///
/// Versions are compared by exact string equality and never parsed.
pub type VersionString = String;

/// Versions for which every required artifact is present.
pub type CompleteVersionSet = BTreeSet<VersionString>;

/// Name of one required artifact, e.g. `webrc-front-ws-ear`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactSpec(String);

impl ArtifactSpec {
    /// Creates a new [`ArtifactSpec`].
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Gets the artifact name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactSpec {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ArtifactSpec {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The versions in which one artifact was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactVersionSet {
    pub artifact: ArtifactSpec,
    pub versions: BTreeSet<VersionString>,
}

impl ArtifactVersionSet {
    /// Creates a new [`ArtifactVersionSet`].
    pub fn new<I, V>(artifact: impl Into<ArtifactSpec>, versions: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<VersionString>,
    {
        Self {
            artifact: artifact.into(),
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of checking one artifact at one version.
///
/// `available == false` is a successful answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presence {
    pub artifact: ArtifactSpec,
    pub version: VersionString,
    pub available: bool,
}
