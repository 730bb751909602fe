//! CMake command lines for one variant.

use std::path::{Path, PathBuf};

use crate::builder::plan::EnvVars;
use crate::resolver::ResolvedArgs;
use crate::util::diagnostic::VariaError;
use crate::util::process::ProcessBuilder;

/// Builds the `cmake` configure and build commands for a variant.
#[derive(Debug, Clone)]
pub struct CMakeInvocation<'a> {
    cmake: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
    args: &'a ResolvedArgs,
    env: &'a EnvVars,
}

impl<'a> CMakeInvocation<'a> {
    pub fn new(
        cmake: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
        args: &'a ResolvedArgs,
        env: &'a EnvVars,
    ) -> Self {
        CMakeInvocation {
            cmake: cmake.into(),
            source_dir: source_dir.into(),
            build_dir: build_dir.into(),
            args,
            env,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// `cmake -S <src> -B <build> <variant args>`
    pub fn configure(&self) -> Result<ProcessBuilder, VariaError> {
        Ok(ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir)
            .args(self.args.to_argv()?)
            .envs(self.env))
    }

    /// `cmake --build <build> [--target <t>] [--parallel [n]]`
    ///
    /// `jobs` of `Some(0)` means "let the generator decide".
    pub fn build(&self, target: Option<&str>, jobs: Option<usize>) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(&self.build_dir);

        if let Some(target) = target {
            cmd = cmd.arg("--target").arg(target);
        }

        match jobs {
            Some(0) => cmd = cmd.arg("--parallel"),
            Some(n) => cmd = cmd.arg("--parallel").arg(n.to_string()),
            None => {}
        }

        cmd.envs(self.env)
    }
}

/// Check if a directory contains a CMake project.
pub fn is_cmake_project(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").exists()
}
