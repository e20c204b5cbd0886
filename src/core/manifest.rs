//! `package.json` parsing and serialization.
//!
//! Only the `packageManager` field is interpreted. The rest of the document
//! is retained as decoded and written back verbatim, so aligning the one
//! recognized field never disturbs anything else in the file.

use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::AlignError;

/// File name of a package manifest.
pub const PACKAGE_MANIFEST: &str = "package.json";

const PACKAGE_MANAGER_KEY: &str = "packageManager";

/// A parsed `package.json` with unknown fields preserved.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    package_manager: String,

    /// The full decoded document. Recognized fields are overlaid onto this
    /// map at serialization time; everything else passes through untouched.
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, AlignError> {
        let document: Map<String, Value> =
            serde_json::from_str(content).map_err(|e| AlignError::SchemaViolation {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let package_manager = match document.get(PACKAGE_MANAGER_KEY) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(schema_violation(path, "`packageManager` must be a string"));
            }
            None => {
                return Err(schema_violation(
                    path,
                    "missing required field `packageManager`",
                ));
            }
        };

        Ok(PackageManifest {
            package_manager,
            document,
        })
    }

    /// The declared package manager, e.g. `pnpm@9.12.0`.
    pub fn package_manager(&self) -> &str {
        &self.package_manager
    }

    /// A copy of this manifest with the package manager replaced.
    pub fn with_package_manager(&self, package_manager: &str) -> PackageManifest {
        PackageManifest {
            package_manager: package_manager.to_string(),
            document: self.document.clone(),
        }
    }

    /// Serialize back to 2-space-indented JSON with a trailing newline.
    ///
    /// An existing `packageManager` key keeps its position in the document.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        let mut document = self.document.clone();
        document.insert(
            PACKAGE_MANAGER_KEY.to_string(),
            Value::String(self.package_manager.clone()),
        );

        let mut rendered = serde_json::to_string_pretty(&Value::Object(document))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

fn schema_violation(path: &Path, message: &str) -> AlignError {
    AlignError::SchemaViolation {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
