//! Implementation of `repokit align`.
//!
//! Loads both sides' manifests, reconciles them, and runs the result
//! through the diff/apply gate. The root's `packageManager` is overwritten
//! with the child's, and the root workspace manifest absorbs the child's
//! member globs, catalog, and overrides. The gate either persists the
//! aligned documents or, in check mode, renders a diff and fails if
//! anything would change.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::dependency::merge_dependencies;
use crate::core::manifest::{PackageManifest, PACKAGE_MANIFEST};
use crate::core::workspace::{union_packages, WorkspaceManifest, WORKSPACE_MANIFEST};
use crate::errors::AlignError;
use crate::util::diff::{render_unified, DiffStyle};
use crate::util::fs;

/// Options for the align operation.
#[derive(Debug, Clone)]
pub struct AlignOptions {
    /// The root repository (the parent side of the merge).
    pub root_dir: PathBuf,

    /// The child repository whose configuration is absorbed.
    pub child_dir: PathBuf,

    /// Report a diff instead of writing, failing on any difference.
    pub check: bool,

    /// Styling for check-mode diff output.
    pub style: DiffStyle,
}

/// One target document paired with its prospective aligned text.
#[derive(Debug)]
struct Artifact {
    path: PathBuf,
    original: String,
    candidate: String,
}

/// Align the root configuration with the child's.
pub fn align(opts: &AlignOptions) -> Result<()> {
    let root_package = opts.root_dir.join(PACKAGE_MANIFEST);
    let child_package = opts.child_dir.join(PACKAGE_MANIFEST);
    let root_workspace = opts.root_dir.join(WORKSPACE_MANIFEST);
    let child_workspace = opts.child_dir.join(WORKSPACE_MANIFEST);

    // All four manifests must exist before anything is read or written.
    for path in [&root_package, &child_package, &root_workspace, &child_workspace] {
        if !path.exists() {
            return Err(AlignError::MissingFile(path.clone()).into());
        }
    }

    tracing::info!(
        "Aligning configuration with that of \"{}\"",
        opts.child_dir.display()
    );

    let artifacts = vec![
        align_package_manifest(&root_package, &child_package)?,
        align_workspace_manifest(&root_workspace, &child_workspace, opts)?,
    ];

    if opts.check {
        check(&artifacts, opts.style)
    } else {
        apply(&artifacts)
    }
}

/// Candidate root `package.json`: the child's `packageManager`, everything
/// else untouched.
fn align_package_manifest(root_path: &Path, child_path: &Path) -> Result<Artifact> {
    let child = PackageManifest::parse(&fs::read_to_string(child_path)?, child_path)?;
    let original = fs::read_to_string(root_path)?;
    let root = PackageManifest::parse(&original, root_path)?;

    let aligned = root.with_package_manager(child.package_manager());
    tracing::debug!("package manager: {}", child.package_manager());

    Ok(Artifact {
        path: root_path.to_path_buf(),
        original,
        candidate: aligned.to_json_string()?,
    })
}

/// Candidate root `pnpm-workspace.yaml`: member globs unioned (child entries
/// rebased onto the child directory), catalog and overrides merged with
/// downgrade detection.
fn align_workspace_manifest(
    root_path: &Path,
    child_path: &Path,
    opts: &AlignOptions,
) -> Result<Artifact> {
    let child = WorkspaceManifest::parse(&fs::read_to_string(child_path)?, child_path)?;
    let original = fs::read_to_string(root_path)?;
    let root = WorkspaceManifest::parse(&original, root_path)?;

    let packages = union_packages(root.packages(), child.packages(), &opts.child_dir);
    let catalog = merge_dependencies(root.catalog(), child.catalog())?;
    let overrides = merge_dependencies(root.overrides(), child.overrides())?;

    let aligned = root.with_merged(packages, catalog, overrides);

    Ok(Artifact {
        path: root_path.to_path_buf(),
        original,
        candidate: aligned.to_yaml_string()?,
    })
}

/// Apply mode: persist every candidate unconditionally.
///
/// All parsing and merging has already succeeded by the time this runs, so
/// the only failure left is I/O; a failed write surfaces immediately with
/// no rollback of earlier writes (re-running `align` repairs a partial
/// application).
fn apply(artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        std::fs::write(&artifact.path, &artifact.candidate).map_err(|source| {
            AlignError::WriteFailure {
                path: artifact.path.clone(),
                source,
            }
        })?;
        tracing::info!("Updated {}", artifact.path.display());
    }
    Ok(())
}

/// Check mode: render a diff per changed document and fail if any exist.
/// Writes nothing under any circumstance.
fn check(artifacts: &[Artifact], style: DiffStyle) -> Result<()> {
    let mut reports = Vec::new();

    for artifact in artifacts {
        if artifact.original.trim() != artifact.candidate.trim() {
            reports.push(render_unified(
                &artifact.path,
                &artifact.original,
                &artifact.candidate,
                style,
            ));
        }
    }

    if reports.is_empty() {
        tracing::info!("Alignment check passed");
        Ok(())
    } else {
        Err(AlignError::AlignmentCheckFailed {
            report: reports.join("\n"),
        }
        .into())
    }
}
