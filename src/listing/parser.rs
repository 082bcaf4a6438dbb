//! Anchor extraction over repository listing pages.
//!
//! The patterns mirror the layout served by Artifactory and Nexus:
//!
//! - version directories: `<a href="VERSION/">`, where `VERSION` starts with
//!   a digit;
//! - artifact files: `<a href="ARTIFACT....EXT">`;
//! - Nexus sub-versions: `<a href="BASE_URL VERSION/">`;
//! - jar files: `<a href="....jar">`.
//!
//! Captures are greedy, so a capture runs up to the last `/">` (or `.EXT">`)
//! of its line. Listing servers emit one anchor per line.

use crate::VersionString;

use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Extension of the artifact files when none is configured.
pub const DEFAULT_EXTENSION: &str = "ear";

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"<a href="([0-9]+.*)/">"#).expect("valid version pattern"))
}

fn jar_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"<a href="(.*\.jar)">"#).expect("valid jar pattern"))
}

/// Extracts versions and artifact links from listing pages.
///
/// Per-artifact patterns are compiled once and shared between clones.
#[derive(Debug, Clone)]
pub struct VersionPageParser {
    extension: String,
    patterns: Arc<RwLock<HashMap<String, Regex>>>,
}

impl Default for VersionPageParser {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl VersionPageParser {
    /// Creates a parser looking for artifact files with the given extension
    /// (without the leading dot).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            patterns: Arc::default(),
        }
    }

    /// Gets the artifact file extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Lists the version directories linked from an artifact page, in page
    /// order. A page without any version yields an empty list.
    pub fn produce_version_list(&self, html: &str) -> Vec<VersionString> {
        debug!("Extracting versions from listing page");
        version_pattern()
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Finds the first link to a file of `artifact` on a version page.
    pub fn find_artifact_link(&self, artifact: &str, html: &str) -> Option<String> {
        debug!(artifact, "Looking for artifact link");
        let pattern = format!(
            r#"<a href="({}.*\.{})">"#,
            regex::escape(artifact),
            regex::escape(&self.extension)
        );
        self.compiled(&pattern)?
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Tells whether a file of `artifact` is linked from a version page.
    pub fn artifact_exists(&self, artifact: &str, html: &str) -> bool {
        self.find_artifact_link(artifact, html).is_some()
    }

    /// Lists the absolute sub-version links of a Nexus project page, i.e.
    /// anchors of the form `<a href="{base_url}1.0/">`.
    pub fn sub_version_links(&self, base_url: &str, html: &str) -> Vec<String> {
        let pattern = format!(r#"<a href="({}[0-9]+.*)/">"#, regex::escape(base_url));
        match self.compiled(&pattern) {
            Some(re) => re
                .captures_iter(html)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Finds the first jar link of a Nexus version page.
    pub fn first_jar_link(&self, html: &str) -> Option<String> {
        jar_pattern()
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Number of patterns compiled so far.
    pub fn compiled_patterns(&self) -> usize {
        self.patterns.read().len()
    }

    fn compiled(&self, pattern: &str) -> Option<Regex> {
        if let Some(re) = self.patterns.read().get(pattern) {
            return Some(re.clone());
        }
        let re = Regex::new(pattern).ok()?;
        let mut patterns = self.patterns.write();
        Some(patterns.entry(pattern.to_string()).or_insert(re).clone())
    }
}
