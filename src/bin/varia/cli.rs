//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell as CompletionShell;

use varia::util::shell::ColorChoice;

/// Varia - named CMake build variants
#[derive(Parser)]
#[command(name = "varia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = parse_color)]
    pub color: ColorChoice,

    /// Path to the plan file (defaults to the nearest Variants.toml)
    #[arg(long, global = true, env = "VARIA_PLAN")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_color(s: &str) -> Result<ColorChoice, String> {
    s.parse()
}

#[derive(Subcommand)]
pub enum Commands {
    /// List declared variants and run targets
    List,

    /// Print the resolved CMake arguments for a variant
    Args(ArgsArgs),

    /// Print the full task configuration
    Plan(PlanArgs),

    /// Configure a variant's build directory
    Configure(ConfigureArgs),

    /// Build a variant
    Build(BuildArgs),

    /// Run a target's executable from a variant's build directory
    Run(RunArgs),

    /// Build a target, then run it
    BuildRun(BuildRunArgs),

    /// Remove build directories
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ArgsArgs {
    /// Variant name (defaults to the first declared variant)
    pub variant: Option<String>,

    /// Print the `{options: {args}}` record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    Json,
    Toml,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = PlanFormat::Json)]
    pub format: PlanFormat,
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Variant name (defaults to the first declared variant)
    pub variant: Option<String>,

    /// Print the cmake command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Variant name (defaults to the first declared variant)
    pub variant: Option<String>,

    /// CMake target to build
    #[arg(long)]
    pub target: Option<String>,

    /// Number of parallel jobs (0 lets the generator decide)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Configure again even if the build directory is configured
    #[arg(long)]
    pub reconfigure: bool,

    /// Print the cmake commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct RunArgs {
    /// Run target name
    pub target: String,

    /// Variant whose build directory holds the executable
    #[arg(long)]
    pub variant: Option<String>,

    /// Print the command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments for the executable
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct BuildRunArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Number of parallel jobs when building
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Variant name (defaults to the first declared variant)
    pub variant: Option<String>,

    /// Clean every declared variant
    #[arg(long, conflicts_with = "variant")]
    pub all: bool,

    /// Print what would be removed
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
