//! Varia CLI - named CMake build variants

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use varia::util::diagnostic::VariaError;
use varia::util::shell::Shell;
use varia::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report(e);
            std::process::exit(1);
        }
    }
}

/// Print an error, with miette's help text for library diagnostics.
fn report(err: anyhow::Error) {
    match err.downcast::<VariaError>() {
        Ok(diag) => eprintln!("{:?}", miette::Report::new(diag)),
        Err(err) => eprintln!("error: {:#}", err),
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("varia=debug")
    } else if cli.quiet {
        EnvFilter::new("varia=error")
    } else {
        EnvFilter::new("varia=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(shell.use_color())
        .without_time()
        .init();

    let ctx = match cli.manifest_path {
        Some(path) => GlobalContext::with_plan_path(std::env::current_dir()?, path),
        None => GlobalContext::new()?,
    };

    // Execute command
    match cli.command {
        Commands::List => commands::list::execute(&ctx),
        Commands::Args(args) => commands::args::execute(&ctx, args),
        Commands::Plan(args) => commands::plan::execute(&ctx, args),
        Commands::Configure(args) => commands::configure::execute(&ctx, &shell, args),
        Commands::Build(args) => commands::build::execute(&ctx, &shell, args),
        Commands::Run(args) => commands::run::execute(&ctx, &shell, args),
        Commands::BuildRun(args) => commands::run::execute_build_run(&ctx, &shell, args),
        Commands::Clean(args) => commands::clean::execute(&ctx, &shell, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
