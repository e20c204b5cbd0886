//! Command implementations

pub mod align;
pub mod clean;
