//! Build-and-run targets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::diagnostic::VariaError;
use crate::util::process::split_args;

/// Arguments passed to a target's executable.
///
/// A single string is split with shell quoting rules when spawning; a list
/// is passed through element by element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CliArgs {
    /// One argument line
    Line(String),
    /// Explicit argument vector
    List(Vec<String>),
}

impl Default for CliArgs {
    fn default() -> Self {
        CliArgs::List(Vec::new())
    }
}

impl CliArgs {
    /// Expand into an argument vector.
    pub fn to_argv(&self) -> Result<Vec<String>, VariaError> {
        match self {
            CliArgs::Line(line) => split_args(line),
            CliArgs::List(items) => Ok(items.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CliArgs::Line(line) => line.trim().is_empty(),
            CliArgs::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for CliArgs {
    fn from(s: &str) -> Self {
        CliArgs::Line(s.to_string())
    }
}

impl From<Vec<String>> for CliArgs {
    fn from(items: Vec<String>) -> Self {
        CliArgs::List(items)
    }
}

/// A "build this, then run that" convenience entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    /// Target name (e.g., "c2ffi")
    pub name: String,
    /// CMake build target that produces the executable
    pub build_step_name: String,
    /// Executable path, relative to the working directory
    pub run_executable_path: PathBuf,
    /// Arguments for the executable
    pub cli_args: CliArgs,
    /// Working directory, relative to the variant's build directory
    pub working_directory: PathBuf,
}

impl BuildTarget {
    /// Create a target that builds and runs `name` from the build directory root.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        BuildTarget {
            build_step_name: name.clone(),
            run_executable_path: PathBuf::from(format!("./{}", name)),
            cli_args: CliArgs::default(),
            working_directory: PathBuf::from("."),
            name,
        }
    }

    /// Set the CMake build target.
    pub fn build_step(mut self, step: impl Into<String>) -> Self {
        self.build_step_name = step.into();
        self
    }

    /// Set the executable path.
    pub fn run(mut self, path: impl Into<PathBuf>) -> Self {
        self.run_executable_path = path.into();
        self
    }

    /// Set the executable arguments.
    pub fn args(mut self, args: impl Into<CliArgs>) -> Self {
        self.cli_args = args.into();
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = dir.into();
        self
    }
}
