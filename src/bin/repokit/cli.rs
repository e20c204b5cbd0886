//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Repokit - monorepo configuration alignment and cleanup
#[derive(Parser)]
#[command(name = "repokit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align the root configuration with a child repository's
    Align(AlignArgs),

    /// Remove generated artifacts under the working tree
    Clean(CleanArgs),
}

#[derive(Args)]
pub struct AlignArgs {
    /// Child repository directory
    pub child: PathBuf,

    /// Report a diff instead of writing, and fail if anything differs
    #[arg(long)]
    pub check: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Directories to leave untouched
    pub ignore: Vec<PathBuf>,
}
