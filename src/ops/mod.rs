//! High-level operations.
//!
//! This module contains the implementation of repokit commands.

pub mod align;
pub mod clean;

pub use align::{align, AlignOptions};
pub use clean::{clean, CleanOptions};
