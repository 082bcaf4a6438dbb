//! Aggregation of per-artifact version sets into complete versions.
//!
//! A version is complete when every required artifact was found in it. The
//! computation only deals with sets, so the order in which concurrent checks
//! completed has no influence on the result.

use crate::artifact::{ArtifactSpec, ArtifactVersionSet, CompleteVersionSet, Presence, VersionString};

use std::collections::{BTreeMap, BTreeSet};

/// Computes the versions present in the set of every `required` artifact.
///
/// Sets of artifacts outside `required` are ignored. An empty `required` set
/// yields no version.
pub fn complete_versions(
    sets: &[ArtifactVersionSet],
    required: &BTreeSet<ArtifactSpec>,
) -> CompleteVersionSet {
    if required.is_empty() {
        return CompleteVersionSet::new();
    }

    let mut found: BTreeMap<&VersionString, BTreeSet<&ArtifactSpec>> = BTreeMap::new();
    for set in sets {
        for version in &set.versions {
            found.entry(version).or_default().insert(&set.artifact);
        }
    }

    found
        .into_iter()
        .filter(|(_, artifacts)| required.iter().all(|a| artifacts.contains(a)))
        .map(|(version, _)| version.clone())
        .collect()
}

/// Lists, sorted, the required artifacts not marked available in `presences`.
pub fn missing_artifacts(presences: &[Presence], required: &BTreeSet<ArtifactSpec>) -> Vec<String> {
    let available: BTreeSet<&ArtifactSpec> = presences
        .iter()
        .filter(|p| p.available)
        .map(|p| &p.artifact)
        .collect();

    required
        .iter()
        .filter(|a| !available.contains(a))
        .map(|a| a.name().to_string())
        .collect()
}
