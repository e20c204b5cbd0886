//! Core data structures for repokit.
//!
//! This module contains the manifest types and the merge logic:
//! - Manifests for the two configuration files, with unknown fields preserved
//! - Dependency map merging with downgrade detection
//! - The version specifier comparator

pub mod dependency;
pub mod manifest;
pub mod version;
pub mod workspace;

pub use dependency::{merge_dependencies, DependencyMap, Downgrade};
pub use manifest::{PackageManifest, PACKAGE_MANIFEST};
pub use version::compare_specifiers;
pub use workspace::{union_packages, WorkspaceManifest, WORKSPACE_MANIFEST};
