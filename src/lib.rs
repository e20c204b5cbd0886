//! Repokit - configuration alignment for a monorepo of monorepos.
//!
//! This crate provides the core library functionality for repokit:
//! keeping a root repository's package-manager configuration a
//! superset-merge of its child repositories', and sweeping generated
//! artifacts out of the working tree.

pub mod core;
pub mod errors;
pub mod ops;
pub mod util;

pub use crate::core::{
    dependency::DependencyMap, manifest::PackageManifest, workspace::WorkspaceManifest,
};
pub use crate::errors::AlignError;
