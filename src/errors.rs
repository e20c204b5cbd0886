//! Alignment error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::dependency::Downgrade;

/// Error raised while aligning or checking repository configuration.
///
/// Every variant is fatal for the invocation: the tool either fully
/// succeeds or surfaces exactly one of these to the process boundary.
#[derive(Debug, Error)]
pub enum AlignError {
    /// A required manifest path does not exist. No mutation has happened.
    #[error("\"{}\" does not exist", .0.display())]
    MissingFile(PathBuf),

    /// A document failed to decode into its expected shape.
    #[error("invalid manifest {}: {message}", .path.display())]
    SchemaViolation { path: PathBuf, message: String },

    /// The child maps a dependency to a version lower than the root's.
    #[error("child would downgrade dependencies:\n{}", list_downgrades(.conflicts))]
    VersionDowngrade { conflicts: Vec<Downgrade> },

    /// Check mode found at least one misaligned document.
    #[error("alignment check failed:\n\n{report}")]
    AlignmentCheckFailed { report: String },

    /// Apply mode could not persist a candidate document.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn list_downgrades(conflicts: &[Downgrade]) -> String {
    let lines: Vec<String> = conflicts.iter().map(ToString::to_string).collect();
    lines.join("\n")
}
