//! `varia plan` command

use anyhow::Result;

use crate::cli::{PlanArgs, PlanFormat};
use varia::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: PlanArgs) -> Result<i32> {
    match args.format {
        PlanFormat::Json => {
            let registry = ctx.registry()?;
            let config = registry.to_task_config();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        PlanFormat::Toml => {
            let plan = ctx.load_plan()?;
            print!("{}", plan.to_toml_string()?);
        }
    }

    Ok(0)
}
