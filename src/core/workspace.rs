//! `pnpm-workspace.yaml` parsing and serialization.
//!
//! Three fields are interpreted: `packages` (workspace member globs),
//! `catalog` and `overrides` (dependency maps). The full decoded mapping is
//! retained so unknown top-level fields round-trip unchanged, and the
//! recognized fields are overlaid back onto it at serialization time.

use std::collections::BTreeSet;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::core::dependency::DependencyMap;
use crate::errors::AlignError;

/// File name of a workspace manifest.
pub const WORKSPACE_MANIFEST: &str = "pnpm-workspace.yaml";

const PACKAGES_KEY: &str = "packages";
const CATALOG_KEY: &str = "catalog";
const OVERRIDES_KEY: &str = "overrides";

/// A parsed `pnpm-workspace.yaml` with unknown fields preserved.
#[derive(Debug, Clone)]
pub struct WorkspaceManifest {
    packages: Vec<String>,
    catalog: DependencyMap,
    overrides: DependencyMap,

    /// The full decoded document, used as the base at serialization time.
    document: Mapping,
}

impl WorkspaceManifest {
    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, AlignError> {
        let document: Mapping =
            serde_yaml::from_str(content).map_err(|e| AlignError::SchemaViolation {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let packages = match document.get(&yaml_str(PACKAGES_KEY)) {
            Some(value) => string_sequence(value).ok_or_else(|| {
                schema_violation(path, "`packages` must be a list of strings")
            })?,
            None => return Err(schema_violation(path, "missing required field `packages`")),
        };
        let catalog = required_dependency_map(&document, CATALOG_KEY, path)?;
        let overrides = required_dependency_map(&document, OVERRIDES_KEY, path)?;

        Ok(WorkspaceManifest {
            packages,
            catalog,
            overrides,
            document,
        })
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn catalog(&self) -> &DependencyMap {
        &self.catalog
    }

    pub fn overrides(&self) -> &DependencyMap {
        &self.overrides
    }

    /// A copy of this manifest with the recognized fields replaced.
    pub fn with_merged(
        &self,
        packages: Vec<String>,
        catalog: DependencyMap,
        overrides: DependencyMap,
    ) -> WorkspaceManifest {
        WorkspaceManifest {
            packages,
            catalog,
            overrides,
            document: self.document.clone(),
        }
    }

    /// Serialize back to YAML.
    ///
    /// Recognized fields keep their original position in the document;
    /// dependency maps are emitted in ascending key order.
    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        let mut document = self.document.clone();
        document.insert(
            yaml_str(PACKAGES_KEY),
            Value::Sequence(self.packages.iter().map(|p| yaml_str(p)).collect()),
        );
        document.insert(yaml_str(CATALOG_KEY), dependency_mapping(&self.catalog));
        document.insert(yaml_str(OVERRIDES_KEY), dependency_mapping(&self.overrides));

        Ok(serde_yaml::to_string(&Value::Mapping(document))?)
    }
}

/// Union of the root's member globs with the child's, the child's rebased
/// onto the child directory, deduplicated and sorted textually.
pub fn union_packages(root: &[String], child: &[String], child_dir: &Path) -> Vec<String> {
    let mut members: BTreeSet<String> = root.iter().cloned().collect();
    for entry in child {
        members.insert(child_dir.join(entry).to_string_lossy().into_owned());
    }
    members.into_iter().collect()
}

fn yaml_str(name: &str) -> Value {
    Value::String(name.to_string())
}

fn required_dependency_map(
    document: &Mapping,
    field: &str,
    path: &Path,
) -> Result<DependencyMap, AlignError> {
    match document.get(&yaml_str(field)) {
        Some(value) => string_mapping(value).ok_or_else(|| {
            schema_violation(path, &format!("`{field}` must be a map of strings"))
        }),
        None => Err(schema_violation(
            path,
            &format!("missing required field `{field}`"),
        )),
    }
}

fn string_sequence(value: &Value) -> Option<Vec<String>> {
    value
        .as_sequence()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn string_mapping(value: &Value) -> Option<DependencyMap> {
    value
        .as_mapping()?
        .iter()
        .map(|(k, v)| Some((k.as_str()?.to_string(), v.as_str()?.to_string())))
        .collect()
}

fn dependency_mapping(map: &DependencyMap) -> Value {
    let mut mapping = Mapping::new();
    for (name, version) in map {
        mapping.insert(yaml_str(name), yaml_str(version));
    }
    Value::Mapping(mapping)
}

fn schema_violation(path: &Path, message: &str) -> AlignError {
    AlignError::SchemaViolation {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("pnpm-workspace.yaml")
    }

    const BASIC: &str = "packages:\n- packages/*\ncatalog:\n  react: 18.2.0\noverrides:\n  lodash: 4.17.21\n";

    #[test]
    fn test_parse_reads_recognized_fields() {
        let ws = WorkspaceManifest::parse(BASIC, &path()).unwrap();

        assert_eq!(ws.packages(), ["packages/*"]);
        assert_eq!(ws.catalog().get("react").unwrap(), "18.2.0");
        assert_eq!(ws.overrides().get("lodash").unwrap(), "4.17.21");
    }

    #[test]
    fn test_missing_field_is_schema_violation() {
        let err = WorkspaceManifest::parse("packages:\n- packages/*\n", &path()).unwrap_err();
        match err {
            AlignError::SchemaViolation { message, .. } => {
                assert!(message.contains("catalog"));
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_mistyped_packages_is_schema_violation() {
        let content = "packages: nope\ncatalog: {}\noverrides: {}\n";
        let err = WorkspaceManifest::parse(content, &path()).unwrap_err();
        assert!(matches!(err, AlignError::SchemaViolation { .. }));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let content = "packages:\n- packages/*\ncatalog:\n  react: 18.2.0\noverrides:\n  lodash: 4.17.21\nonlyBuiltDependencies:\n- esbuild\n";
        let ws = WorkspaceManifest::parse(content, &path()).unwrap();

        let rendered = ws.to_yaml_string().unwrap();
        assert!(rendered.contains("onlyBuiltDependencies"));
        assert!(rendered.contains("- esbuild"));
    }

    #[test]
    fn test_serialization_is_stable() {
        let ws = WorkspaceManifest::parse(BASIC, &path()).unwrap();
        let once = ws.to_yaml_string().unwrap();

        let reparsed = WorkspaceManifest::parse(&once, &path()).unwrap();
        assert_eq!(reparsed.to_yaml_string().unwrap(), once);
    }

    #[test]
    fn test_catalog_is_emitted_in_key_order() {
        let ws = WorkspaceManifest::parse(BASIC, &path()).unwrap();
        let merged = ws.with_merged(
            ws.packages().to_vec(),
            [("zod", "3.0.0"), ("react", "18.2.0"), ("ajv", "8.0.0")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ws.overrides().clone(),
        );

        let rendered = merged.to_yaml_string().unwrap();
        let ajv = rendered.find("ajv:").unwrap();
        let react = rendered.find("react:").unwrap();
        let zod = rendered.find("zod:").unwrap();
        assert!(ajv < react && react < zod);
    }

    #[test]
    fn test_union_packages_rebases_and_sorts() {
        let merged = union_packages(
            &["packages/*".to_string()],
            &["lib".to_string()],
            Path::new("apps/child"),
        );

        assert_eq!(merged, ["apps/child/lib", "packages/*"]);
    }

    #[test]
    fn test_union_packages_is_idempotent() {
        let root = ["packages/*".to_string()];
        let child = ["lib".to_string(), "tools/*".to_string()];
        let child_dir = Path::new("apps/child");

        let once = union_packages(&root, &child, child_dir);
        let twice = union_packages(&once, &child, child_dir);
        assert_eq!(once, twice);
    }
}
