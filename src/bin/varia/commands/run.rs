//! `varia run` and `varia build-run` commands
//!
//! Both exit with the executable's own exit code.

use anyhow::Result;

use crate::cli::{BuildRunArgs, RunArgs};
use varia::ops::{self, OpContext, RunOptions};
use varia::util::shell::Shell;
use varia::GlobalContext;

fn options(args: RunArgs, jobs: Option<usize>) -> (RunOptions, bool) {
    let opts = RunOptions {
        target: args.target,
        variant: args.variant,
        extra_args: args.args,
        jobs,
    };
    (opts, args.dry_run)
}

pub fn execute(ctx: &GlobalContext, shell: &Shell, args: RunArgs) -> Result<i32> {
    let registry = ctx.registry()?;
    let (opts, dry_run) = options(args, None);
    let op = OpContext {
        ctx,
        registry: &registry,
        shell,
        dry_run,
    };

    ops::run(&op, &opts)
}

pub fn execute_build_run(ctx: &GlobalContext, shell: &Shell, args: BuildRunArgs) -> Result<i32> {
    let registry = ctx.registry()?;
    let (opts, dry_run) = options(args.run, args.jobs);
    let op = OpContext {
        ctx,
        registry: &registry,
        shell,
        dry_run,
    };

    ops::build_run(&op, &opts)
}
