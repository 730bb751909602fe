//! `varia list` command

use anyhow::Result;

use varia::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<i32> {
    let registry = ctx.registry()?;

    println!("variants:");
    for (i, variant) in registry.variants().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        println!(
            "    {:<20} toolchain={} config={} dir={}{}",
            variant.name,
            variant.request.toolchain,
            variant.request.build_config_name,
            registry.build_dir(variant).display(),
            marker
        );
    }

    let mut targets = registry.targets().peekable();
    if targets.peek().is_some() {
        println!("targets:");
        for target in targets {
            println!(
                "    {:<20} build={} run={} cwd={}",
                target.name,
                target.build_step_name,
                target.run_executable_path.display(),
                target.working_directory.display()
            );
        }
    }

    Ok(0)
}
