//! `repokit clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use repokit::ops::clean::{clean, CleanOptions};

pub fn execute(args: CleanArgs) -> Result<()> {
    let opts = CleanOptions {
        root_dir: std::env::current_dir()?,
        ignore: args.ignore,
    };

    clean(&opts)
}
