//! Dependency map merging.
//!
//! A dependency map is the `catalog` or `overrides` table of a workspace
//! manifest: package name mapped to a version specifier. Merging pulls the
//! child's entries into the root's, refusing to go backwards on any pinned
//! version.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::core::version::compare_specifiers;
use crate::errors::AlignError;

/// Package name to version specifier, canonically ordered by key.
pub type DependencyMap = BTreeMap<String, String>;

/// One dependency the child maps to a lower version than the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downgrade {
    pub name: String,
    pub child: String,
    pub parent: String,
}

impl fmt::Display for Downgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: child has {}, parent has {}",
            self.name, self.child, self.parent
        )
    }
}

/// Merge the child's dependencies into the parent's.
///
/// The result contains every key from both sides with the child's value
/// winning on collision. If the child would lower the version of any key
/// the parent pins, the merge fails with [`AlignError::VersionDowngrade`]
/// enumerating every offending dependency, not just the first. Inputs are
/// never mutated.
pub fn merge_dependencies(
    parent: &DependencyMap,
    child: &DependencyMap,
) -> Result<DependencyMap, AlignError> {
    let mut conflicts = Vec::new();

    for (name, child_version) in child {
        if let Some(parent_version) = parent.get(name) {
            if compare_specifiers(child_version, parent_version) == Ordering::Less {
                conflicts.push(Downgrade {
                    name: name.clone(),
                    child: child_version.clone(),
                    parent: parent_version.clone(),
                });
            }
        }
    }

    if !conflicts.is_empty() {
        return Err(AlignError::VersionDowngrade { conflicts });
    }

    let mut merged = parent.clone();
    for (name, version) in child {
        merged.insert(name.clone(), version.clone());
    }

    Ok(merged)
}
