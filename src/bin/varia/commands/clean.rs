//! `varia clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use varia::ops::{self, CleanOptions, OpContext};
use varia::util::shell::Shell;
use varia::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Shell, args: CleanArgs) -> Result<i32> {
    let registry = ctx.registry()?;
    let op = OpContext {
        ctx,
        registry: &registry,
        shell,
        dry_run: args.dry_run,
    };

    let opts = CleanOptions {
        variant: args.variant,
        all: args.all,
    };
    let removed = ops::clean(&op, &opts)?;
    if removed.is_empty() && !args.dry_run {
        shell.note("nothing to clean");
    }

    Ok(0)
}
