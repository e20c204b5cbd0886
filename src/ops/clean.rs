//! Implementation of `repokit clean`.
//!
//! Discovers every `package.json` under the working tree and removes the
//! generated artifacts next to each one. Each manifest's cleanup targets a
//! disjoint directory subtree, so removals run in parallel and one failure
//! never blocks the rest.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::core::manifest::PACKAGE_MANIFEST;
use crate::util::fs::remove_path_if_exists;

/// Generated artifacts removed next to every discovered manifest.
const GENERATED_ARTIFACTS: &[&str] = &[".tsbuildinfo", "dist", "node_modules", ".tanstack", ".turbo"];

/// Options for the clean operation.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// The tree to sweep.
    pub root_dir: PathBuf,

    /// Directories (relative to the root) to leave untouched.
    pub ignore: Vec<PathBuf>,
}

/// Remove generated artifacts adjacent to every manifest under the root.
pub fn clean(opts: &CleanOptions) -> Result<()> {
    let packages = discover_packages(&opts.root_dir, &opts.ignore)?;

    packages.par_iter().for_each(|dir| {
        if let Err(e) = clean_package(dir) {
            tracing::warn!("failed to clean {}: {:#}", dir.display(), e);
        }
    });

    Ok(())
}

/// Every directory under `root` holding a `package.json`, skipping ignored
/// prefixes. Traversal does not descend into artifact directories: any
/// manifest inside them is itself scheduled for removal.
fn discover_packages(root: &Path, ignore: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_artifact_dir(entry) && !is_ignored(entry, root, ignore));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == OsStr::new(PACKAGE_MANIFEST) {
            let dir = entry.path().parent().unwrap_or(root).to_path_buf();
            dirs.push(dir);
        }
    }

    Ok(dirs)
}

fn clean_package(dir: &Path) -> Result<()> {
    tracing::info!("Cleaning \"{}\"", dir.display());
    for name in GENERATED_ARTIFACTS {
        remove_path_if_exists(&dir.join(name))?;
    }
    Ok(())
}

fn is_artifact_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && GENERATED_ARTIFACTS
            .iter()
            .any(|name| entry.file_name() == OsStr::new(name))
}

fn is_ignored(entry: &DirEntry, root: &Path, ignore: &[PathBuf]) -> bool {
    let relative = match entry.path().strip_prefix(root) {
        Ok(relative) => relative,
        Err(_) => return false,
    };
    ignore.iter().any(|prefix| relative.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_package(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(PACKAGE_MANIFEST), "{}").unwrap();
        fs::create_dir_all(dir.join("node_modules").join("react")).unwrap();
        fs::create_dir_all(dir.join("dist")).unwrap();
        fs::write(dir.join(".tsbuildinfo"), "{}").unwrap();
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src").join("index.ts"), "export {}").unwrap();
    }

    #[test]
    fn test_clean_removes_artifacts_everywhere() {
        let tmp = TempDir::new().unwrap();
        make_package(tmp.path());
        make_package(&tmp.path().join("apps").join("web"));

        clean(&CleanOptions {
            root_dir: tmp.path().to_path_buf(),
            ignore: Vec::new(),
        })
        .unwrap();

        for dir in [tmp.path().to_path_buf(), tmp.path().join("apps").join("web")] {
            assert!(!dir.join("node_modules").exists());
            assert!(!dir.join("dist").exists());
            assert!(!dir.join(".tsbuildinfo").exists());
            assert!(dir.join("src").join("index.ts").exists());
        }
    }

    #[test]
    fn test_ignored_directories_are_untouched() {
        let tmp = TempDir::new().unwrap();
        make_package(tmp.path());
        make_package(&tmp.path().join("vendor").join("sdk"));

        clean(&CleanOptions {
            root_dir: tmp.path().to_path_buf(),
            ignore: vec![PathBuf::from("vendor")],
        })
        .unwrap();

        assert!(!tmp.path().join("node_modules").exists());
        assert!(tmp
            .path()
            .join("vendor")
            .join("sdk")
            .join("node_modules")
            .exists());
    }

    #[test]
    fn test_manifests_inside_artifacts_are_not_discovered() {
        let tmp = TempDir::new().unwrap();
        make_package(tmp.path());
        // A dependency's own manifest lives under node_modules.
        fs::write(
            tmp.path().join("node_modules").join("react").join(PACKAGE_MANIFEST),
            "{}",
        )
        .unwrap();

        let discovered = discover_packages(tmp.path(), &[]).unwrap();
        assert_eq!(discovered, vec![tmp.path().to_path_buf()]);
    }
}
