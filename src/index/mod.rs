//! Version discovery over the artifact repository.
//!
//! The repository exposes one listing page per artifact
//! (`{repository}/{artifact}`) linking its version directories, and one page
//! per version (`{repository}/{artifact}/{version}`) linking the files. A
//! version directory may exist without the artifact file, so every version is
//! checked individually.

pub mod version_index;

pub use version_index::ArtifactVersionIndex;
