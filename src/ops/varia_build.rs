//! Configure and build a variant.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::cmake::is_cmake_project;
use crate::builder::{CMakeInvocation, Variant};
use crate::ops::OpContext;
use crate::util::diagnostic::VariaError;
use crate::util::fs::{ensure_dir, is_configured};
use crate::util::shell::Status;

/// Options for `build`.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Variant to build (defaults to the first declared)
    pub variant: Option<String>,
    /// CMake target to build (defaults to all)
    pub target: Option<String>,
    /// Parallel jobs; `Some(0)` lets the generator choose
    pub jobs: Option<usize>,
    /// Re-run configure even if the build directory is configured
    pub reconfigure: bool,
}

fn invocation<'a>(op: &'a OpContext<'_>, variant: &'a Variant) -> Result<CMakeInvocation<'a>> {
    let cmake = op.cmake()?;
    let source_dir = op.ctx.project_path(op.registry.src_dir());
    let build_dir = op.ctx.project_path(&op.registry.build_dir(variant));

    Ok(CMakeInvocation::new(
        cmake,
        source_dir,
        build_dir,
        &variant.args,
        op.registry.env(),
    ))
}

fn configure_variant(op: &OpContext<'_>, inv: &CMakeInvocation<'_>, variant: &Variant) -> Result<()> {
    let cmd = inv.configure()?;
    if !op.dry_run {
        if !is_cmake_project(inv.source_dir()) {
            return Err(VariaError::NotCMakeProject {
                dir: inv.source_dir().to_path_buf(),
            }
            .into());
        }
        ensure_dir(inv.build_dir())?;
    }
    op.cmake_step(
        Status::Configuring,
        &format!("{} ({})", variant.name, inv.build_dir().display()),
        &cmd,
    )
}

/// Run CMake configuration for a variant. Returns the build directory.
pub fn configure(op: &OpContext<'_>, variant: Option<&str>) -> Result<PathBuf> {
    let variant = op.registry.variant_or_default(variant)?;
    let inv = invocation(op, variant)?;

    configure_variant(op, &inv, variant)?;

    Ok(inv.build_dir().to_path_buf())
}

/// Build a variant, configuring it first if needed. Returns the build directory.
pub fn build(op: &OpContext<'_>, opts: &BuildOptions) -> Result<PathBuf> {
    let variant = op.registry.variant_or_default(opts.variant.as_deref())?;
    let inv = invocation(op, variant)?;

    if opts.reconfigure || !is_configured(inv.build_dir()) {
        configure_variant(op, &inv, variant)?;
    } else {
        tracing::debug!("{} already configured", inv.build_dir().display());
    }

    let what = match opts.target {
        Some(ref target) => format!("{} ({})", target, variant.name),
        None => variant.name.clone(),
    };
    op.cmake_step(
        Status::Building,
        &what,
        &inv.build(opts.target.as_deref(), opts.jobs),
    )?;

    Ok(inv.build_dir().to_path_buf())
}
