//! Plan file support.
//!
//! A project declares its variants in `Variants.toml` at the project root:
//!
//! ```toml
//! [options]
//! src_dir = "."
//! build_root = "build"
//!
//! [options.env]
//! LSAN_OPTIONS = "suppressions=../../../lsan_suppress.txt"
//!
//! [[variant]]
//! toolchain = "clang"
//! config = "Debug"
//! opts = ["-DENABLE_TESTS=ON"]
//!
//! [target.c2ffi]
//! build = "c2ffi"
//! run = "./c2ffi"
//! args = "/usr/include/stdio.h"
//! cwd = "bin"
//! ```
//!
//! Without a plan file the built-in table is used. Omitted option keys fall
//! back to the built-in values; an explicit empty `[options.env]` clears the
//! environment.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::builder::plan::{
    default_targets, default_variants, BuildPlanRegistry, EnvVars, GlobalOptions,
};
use crate::builder::ConfigNameDir;
use crate::core::{BuildTarget, BuildVariantRequest, CliArgs, ExtraOptions};
use crate::resolver::{FsProbe, VariantResolver, WarningSink};
use crate::util::diagnostic::VariaError;

/// Plan file name.
pub const PLAN_FILE_NAME: &str = "Variants.toml";

/// Contents of `Variants.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanFile {
    pub options: PlanOptions,

    #[serde(rename = "variant")]
    pub variants: Vec<VariantDecl>,

    /// Run targets in the order they appear in the file
    #[serde(rename = "target")]
    pub targets: IndexMap<String, TargetDecl>,
}

/// `[options]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlanOptions {
    /// Source directory handed to `cmake -S`
    pub src_dir: Option<PathBuf>,

    /// Parent of the per-configuration build directories
    pub build_root: Option<PathBuf>,

    /// Environment for CMake and run targets
    pub env: Option<EnvVars>,
}

/// One `[[variant]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantDecl {
    /// Variant key; defaults to `<toolchain>-<config>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub toolchain: String,

    pub config: String,

    #[serde(default, skip_serializing_if = "ExtraOptions::is_none")]
    pub opts: ExtraOptions,
}

impl VariantDecl {
    /// The variant key.
    pub fn key(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.toolchain, self.config))
    }

    fn to_request(&self) -> BuildVariantRequest {
        BuildVariantRequest::new(&self.toolchain, &self.config).with_options(self.opts.clone())
    }
}

/// One `[target.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetDecl {
    /// CMake target to build; defaults to the target name
    pub build: Option<String>,

    /// Executable relative to `cwd`; defaults to `./<name>`
    pub run: Option<PathBuf>,

    pub args: CliArgs,

    /// Working directory relative to the build directory; defaults to `.`
    pub cwd: Option<PathBuf>,
}

impl TargetDecl {
    fn to_target(&self, name: &str) -> BuildTarget {
        let mut target = BuildTarget::new(name).args(self.args.clone());
        if let Some(ref build) = self.build {
            target = target.build_step(build);
        }
        if let Some(ref run) = self.run {
            target = target.run(run);
        }
        if let Some(ref cwd) = self.cwd {
            target = target.cwd(cwd);
        }
        target
    }
}

impl PlanFile {
    /// The built-in plan, spelled out.
    pub fn builtin() -> Self {
        let defaults = GlobalOptions::default();

        let variants = default_variants()
            .into_iter()
            .map(|(_, req)| VariantDecl {
                name: None,
                toolchain: req.toolchain,
                config: req.build_config_name,
                opts: req.extra_options,
            })
            .collect();

        let targets = default_targets()
            .into_iter()
            .map(|t| {
                let decl = TargetDecl {
                    build: Some(t.build_step_name),
                    run: Some(t.run_executable_path),
                    args: t.cli_args,
                    cwd: Some(t.working_directory),
                };
                (t.name, decl)
            })
            .collect();

        PlanFile {
            options: PlanOptions {
                src_dir: Some(defaults.src_dir),
                build_root: Some(defaults.build_dir.root().to_path_buf()),
                env: Some(defaults.env),
            },
            variants,
            targets,
        }
    }

    /// Parse a plan from TOML text.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, VariaError> {
        let plan: PlanFile = toml::from_str(contents).map_err(|source| VariaError::ParsePlan {
            path: path.to_path_buf(),
            source,
        })?;
        plan.validate()?;
        Ok(plan)
    }

    /// Load a plan file.
    pub fn load(path: &Path) -> Result<Self, VariaError> {
        let contents = std::fs::read_to_string(path).map_err(|source| VariaError::ReadPlan {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Load a plan file, or use the built-in plan if it does not exist.
    pub fn load_or_builtin(path: &Path) -> Result<Self, VariaError> {
        if path.exists() {
            tracing::debug!("loading plan from {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("no {} found, using built-in plan", PLAN_FILE_NAME);
            Ok(Self::builtin())
        }
    }

    /// Reject plans with no variants or with repeated variant keys.
    pub fn validate(&self) -> Result<(), VariaError> {
        if self.variants.is_empty() {
            return Err(VariaError::NoVariants);
        }

        let mut seen: Vec<String> = Vec::new();
        for decl in &self.variants {
            let key = decl.key();
            if seen.contains(&key) {
                return Err(VariaError::DuplicateVariant(key));
            }
            seen.push(key);
        }

        Ok(())
    }

    /// Global options with built-in fallbacks.
    pub fn global_options(&self) -> GlobalOptions {
        let defaults = GlobalOptions::default();

        GlobalOptions {
            src_dir: self.options.src_dir.clone().unwrap_or(defaults.src_dir),
            build_dir: self
                .options
                .build_root
                .clone()
                .map(ConfigNameDir::new)
                .unwrap_or(defaults.build_dir),
            env: self.options.env.clone().unwrap_or(defaults.env),
        }
    }

    /// Resolve every variant and build the registry.
    pub fn build_registry<P: FsProbe, W: WarningSink>(
        &self,
        resolver: &VariantResolver<P, W>,
    ) -> BuildPlanRegistry {
        let declared = self.variants.iter().map(|d| (d.key(), d.to_request()));
        let targets = self
            .targets
            .iter()
            .map(|(name, decl)| decl.to_target(name));

        BuildPlanRegistry::construct(resolver, self.global_options(), declared, targets)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
