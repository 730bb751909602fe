//! High-level operations behind the CLI commands.

pub mod varia_build;
pub mod varia_clean;
pub mod varia_run;

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::BuildPlanRegistry;
use crate::util::context::GlobalContext;
use crate::util::diagnostic::VariaError;
use crate::util::process::{find_cmake, ProcessBuilder};
use crate::util::shell::{Shell, Status};

pub use varia_build::{build, configure, BuildOptions};
pub use varia_clean::{clean, CleanOptions};
pub use varia_run::{build_run, run, RunOptions};

/// What an operation needs from its caller.
pub struct OpContext<'a> {
    pub ctx: &'a GlobalContext,
    pub registry: &'a BuildPlanRegistry,
    pub shell: &'a Shell,
    /// Print commands instead of running them
    pub dry_run: bool,
}

impl OpContext<'_> {
    /// Locate cmake. Dry runs fall back to a bare `cmake`.
    fn cmake(&self) -> Result<PathBuf> {
        match find_cmake() {
            Some(path) => Ok(path),
            None if self.dry_run => Ok(PathBuf::from("cmake")),
            None => Err(VariaError::CMakeNotFound.into()),
        }
    }

    /// Run one cmake step, or print it in dry-run mode.
    ///
    /// Output is captured behind a spinner unless the shell is verbose, in
    /// which case cmake writes straight to the terminal.
    fn cmake_step(&self, status: Status, what: &str, cmd: &ProcessBuilder) -> Result<()> {
        if self.dry_run {
            println!("{}", cmd.display_command());
            return Ok(());
        }

        if self.shell.is_verbose() {
            self.shell.status(status, what);
            let exit = cmd.status()?;
            if !exit.success() {
                bail!("{} failed with exit code {:?}", what, exit.code());
            }
            return Ok(());
        }

        let step = self.shell.step(status, what);
        let output = cmd.exec()?;
        if !output.status.success() {
            drop(step);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} failed:\n{}{}", what, stdout, stderr);
        }
        step.finish(what);

        Ok(())
    }
}
