//! `varia args` command
//!
//! Prints the argument line exactly as resolved, including the trailing
//! separator when the variant has no extra options.

use anyhow::Result;

use crate::cli::ArgsArgs;
use varia::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: ArgsArgs) -> Result<i32> {
    let registry = ctx.registry()?;
    let variant = registry.variant_or_default(args.variant.as_deref())?;

    if args.json {
        let record = variant.args.clone().into_variant_config();
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", variant.args.argument_string());
    }

    Ok(0)
}
