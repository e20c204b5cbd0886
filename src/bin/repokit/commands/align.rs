//! `repokit align` command

use anyhow::Result;

use crate::cli::AlignArgs;
use repokit::ops::align::{align, AlignOptions};
use repokit::util::DiffStyle;

pub fn execute(args: AlignArgs, no_color: bool) -> Result<()> {
    let opts = AlignOptions {
        root_dir: std::env::current_dir()?,
        child_dir: args.child,
        check: args.check,
        style: DiffStyle::auto(no_color),
    };

    align(&opts)
}
