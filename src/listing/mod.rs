//! Directory listing parsing.
//!
//! Repository pages are plain HTML directory listings where every child
//! version or file is an anchor. This module extracts those anchors with
//! pattern matching only; no HTML parsing is involved.
//!
//! # Examples
//!
//! ```rust
//! use quarry::listing::VersionPageParser;
//!
//! let html = "<a href=\"1.2.3/\">1.2.3/</a>\n<a href=\"1.2.4/\">1.2.4/</a>\n<a href=\"readme\">readme</a>";
//! let parser = VersionPageParser::default();
//! assert_eq!(parser.produce_version_list(html), vec!["1.2.3", "1.2.4"]);
//!
//! let page = "<a href=\"app-ear-1.2.3.ear\">app-ear-1.2.3.ear</a>";
//! assert!(parser.artifact_exists("app-ear", page));
//! ```

pub mod parser;

pub use parser::{VersionPageParser, DEFAULT_EXTENSION};
