//! `varia build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use varia::ops::{self, BuildOptions, OpContext};
use varia::util::shell::Shell;
use varia::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Shell, args: BuildArgs) -> Result<i32> {
    let registry = ctx.registry()?;
    let op = OpContext {
        ctx,
        registry: &registry,
        shell,
        dry_run: args.dry_run,
    };

    let opts = BuildOptions {
        variant: args.variant,
        target: args.target,
        jobs: args.jobs,
        reconfigure: args.reconfigure,
    };
    let build_dir = ops::build(&op, &opts)?;
    tracing::debug!("build output in {}", build_dir.display());

    Ok(0)
}
