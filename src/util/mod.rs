//! Shared utilities

pub mod diff;
pub mod fs;

pub use diff::DiffStyle;
