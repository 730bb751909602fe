//! `varia configure` command

use anyhow::Result;

use crate::cli::ConfigureArgs;
use varia::ops::{self, OpContext};
use varia::util::shell::Shell;
use varia::GlobalContext;

pub fn execute(ctx: &GlobalContext, shell: &Shell, args: ConfigureArgs) -> Result<i32> {
    let registry = ctx.registry()?;
    let op = OpContext {
        ctx,
        registry: &registry,
        shell,
        dry_run: args.dry_run,
    };

    ops::configure(&op, args.variant.as_deref())?;

    Ok(0)
}
