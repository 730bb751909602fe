//! Run a build-and-run target.

use anyhow::{bail, Result};

use crate::ops::varia_build::{build, BuildOptions};
use crate::ops::OpContext;
use crate::util::process::ProcessBuilder;
use crate::util::shell::Status;

/// Options for `run` and `build_run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Target name
    pub target: String,
    /// Variant whose build directory holds the executable
    pub variant: Option<String>,
    /// Appended after the target's own arguments
    pub extra_args: Vec<String>,
    /// Parallel jobs for the build half of `build_run`
    pub jobs: Option<usize>,
}

/// The process that runs `opts.target` for the selected variant.
pub fn run_command(op: &OpContext<'_>, opts: &RunOptions) -> Result<ProcessBuilder> {
    let target = op.registry.target(&opts.target)?;
    let variant = op.registry.variant_or_default(opts.variant.as_deref())?;

    let build_dir = op.ctx.project_path(&op.registry.build_dir(variant));
    let work_dir = build_dir.join(&target.working_directory);
    let exe = work_dir.join(&target.run_executable_path);

    Ok(ProcessBuilder::new(exe)
        .args(target.cli_args.to_argv()?)
        .args(&opts.extra_args)
        .envs(op.registry.env())
        .cwd(work_dir))
}

/// Run a target's executable. Returns its exit code.
///
/// A child killed by a signal reports exit code 1.
pub fn run(op: &OpContext<'_>, opts: &RunOptions) -> Result<i32> {
    let cmd = run_command(op, opts)?;

    if op.dry_run {
        if let Some(cwd) = cmd.get_cwd() {
            println!("cd {}", cwd.display());
        }
        println!("{}", cmd.display_command());
        return Ok(0);
    }

    if !cmd.get_program().is_file() {
        bail!(
            "executable not found: {}\n\nhelp: Run `varia build-run {}` to build it first",
            cmd.get_program().display(),
            opts.target
        );
    }

    op.shell.status(Status::Running, cmd.display_command());
    let status = cmd.status()?;

    Ok(status.code().unwrap_or(1))
}

/// Build a target's build step, then run it. Returns the exit code.
pub fn build_run(op: &OpContext<'_>, opts: &RunOptions) -> Result<i32> {
    let target = op.registry.target(&opts.target)?;

    let build_opts = BuildOptions {
        variant: opts.variant.clone(),
        target: Some(target.build_step_name.clone()),
        jobs: opts.jobs,
        reconfigure: false,
    };
    build(op, &build_opts)?;

    run(op, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProject;

    fn opts(target: &str) -> RunOptions {
        RunOptions {
            target: target.to_string(),
            ..RunOptions::default()
        }
    }

    #[test]
    fn test_run_command_for_default_target() {
        let project = TestProject::builtin();
        let cmd = run_command(&project.op(true), &opts("c2ffi")).unwrap();

        let work_dir = project.root().join("build/Debug/bin");
        assert_eq!(cmd.get_cwd(), Some(work_dir.as_path()));
        assert_eq!(cmd.get_program(), work_dir.join("./c2ffi").as_path());
        assert_eq!(cmd.get_args(), &["/usr/include/stdio.h"]);
        assert!(cmd.get_env().contains_key("LSAN_OPTIONS"));
    }

    #[test]
    fn test_run_command_with_variant_and_extra_args() {
        let project = TestProject::builtin();
        let mut run_opts = opts("c2ffi");
        run_opts.variant = Some("clang-Release".to_string());
        run_opts.extra_args = vec!["-o".to_string(), "out.json".to_string()];

        let cmd = run_command(&project.op(true), &run_opts).unwrap();

        assert!(cmd.get_program().starts_with(project.root().join("build/Release")));
        assert_eq!(cmd.get_args(), &["/usr/include/stdio.h", "-o", "out.json"]);
    }

    #[test]
    fn test_run_unknown_target() {
        let project = TestProject::builtin();
        let err = run_command(&project.op(true), &opts("nope")).unwrap_err();

        assert!(err.to_string().contains("unknown run target `nope`"));
    }

    #[test]
    fn test_run_missing_executable() {
        let project = TestProject::builtin();
        let err = run(&project.op(false), &opts("c2ffi")).unwrap_err();

        assert!(err.to_string().contains("executable not found"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_propagates_exit_code() {
        use std::os::unix::fs::PermissionsExt;

        let project = TestProject::with_plan(
            r#"
[[variant]]
toolchain = "clang"
config = "Debug"

[target.probe]
run = "probe.sh"
args = "7"
"#,
        );
        let dir = project.root().join("build/Debug");
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("probe.sh");
        std::fs::write(&script, "#!/bin/sh\nexit \"$1\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let code = run(&project.op(false), &opts("probe")).unwrap();
        assert_eq!(code, 7);
    }
}
