//! Variant resolution.
//!
//! Turns a [`BuildVariantRequest`] into the CMake argument line for one
//! build variant. The line has the shape
//!
//! ```text
//! [-C <home>/.config/CPM/package-local.cmake ]-DTOOLCHAIN=<tc> -DBUILD_CONFIG=<cfg> <opts>
//! ```
//!
//! The `-C` flag is only present when the user-level CPM override file
//! exists. When it does not, a warning goes to the injected sink and
//! resolution carries on. The options segment is always emitted, so a
//! request without options ends in a single space.

mod probe;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{BuildVariantRequest, ExtraOptions};
use crate::util::diagnostic::VariaError;

pub use probe::{FsProbe, RecordingSink, StaticProbe, SystemProbe, TracingSink, WarningSink};

/// Location of the CPM override file, relative to the home directory.
pub const PACKAGE_LOCAL_PATH: &str = ".config/CPM/package-local.cmake";

/// Warning emitted when the override file is missing.
pub const NO_PACKAGE_LOCAL_WARNING: &str = "no local CPM configuration";

/// Path of the CPM override file under `home`.
pub fn package_local_path(home: &Path) -> PathBuf {
    home.join(PACKAGE_LOCAL_PATH)
}

/// The flattened CMake argument line for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgs {
    argument_string: String,
    override_file: Option<PathBuf>,
    toolchain: String,
    build_config_name: String,
    extra_options: ExtraOptions,
}

impl ResolvedArgs {
    fn new(
        override_file: Option<PathBuf>,
        toolchain: &str,
        build_config_name: &str,
        extra_options: &ExtraOptions,
    ) -> Self {
        let mut argument_string = String::new();
        if let Some(ref path) = override_file {
            argument_string.push_str(&format!("-C {} ", path.display()));
        }
        argument_string.push_str(&format!(
            "-DTOOLCHAIN={} -DBUILD_CONFIG={} {}",
            toolchain,
            build_config_name,
            extra_options.normalize()
        ));

        ResolvedArgs {
            argument_string,
            override_file,
            toolchain: toolchain.to_string(),
            build_config_name: build_config_name.to_string(),
            extra_options: extra_options.clone(),
        }
    }

    /// The argument line as handed to the task runner.
    pub fn argument_string(&self) -> &str {
        &self.argument_string
    }

    /// The override file passed with `-C`, if it was found.
    pub fn override_file(&self) -> Option<&Path> {
        self.override_file.as_deref()
    }

    /// Argument vector for spawning CMake directly.
    ///
    /// The override path stays a single element even if it contains spaces.
    /// Options are split with shell quoting rules, so a quoted flag value
    /// reaches CMake as one argument.
    pub fn to_argv(&self) -> Result<Vec<String>, VariaError> {
        let mut argv = Vec::new();
        if let Some(ref path) = self.override_file {
            argv.push("-C".to_string());
            argv.push(path.display().to_string());
        }
        argv.push(format!("-DTOOLCHAIN={}", self.toolchain));
        argv.push(format!("-DBUILD_CONFIG={}", self.build_config_name));
        argv.extend(self.extra_options.to_argv()?);
        Ok(argv)
    }

    /// Wrap into the per-variant record `{options: {args}}`.
    pub fn into_variant_config(self) -> VariantConfig {
        VariantConfig {
            options: VariantOptions {
                args: self.argument_string,
            },
        }
    }
}

impl fmt::Display for ResolvedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argument_string)
    }
}

/// Per-variant configuration record consumed by the task runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub options: VariantOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptions {
    pub args: String,
}

/// Resolves variant requests against a filesystem probe.
#[derive(Debug, Clone, Default)]
pub struct VariantResolver<P = SystemProbe, W = TracingSink> {
    probe: P,
    sink: W,
}

impl VariantResolver {
    /// Resolver backed by the real filesystem and `tracing`.
    pub fn system() -> Self {
        VariantResolver::new(SystemProbe, TracingSink)
    }
}

impl<P: FsProbe, W: WarningSink> VariantResolver<P, W> {
    pub fn new(probe: P, sink: W) -> Self {
        VariantResolver { probe, sink }
    }

    /// Locate the override file, warning if it is absent.
    fn override_file(&self) -> Option<PathBuf> {
        let found = self
            .probe
            .home_dir()
            .map(|home| package_local_path(&home))
            .filter(|path| self.probe.exists(path));

        match found {
            Some(path) => {
                tracing::debug!("using CPM override file {}", path.display());
                Some(path)
            }
            None => {
                self.sink.warn(NO_PACKAGE_LOCAL_WARNING);
                None
            }
        }
    }

    /// Compute the argument line for `request`.
    pub fn resolve(&self, request: &BuildVariantRequest) -> ResolvedArgs {
        let override_file = self.override_file();
        ResolvedArgs::new(
            override_file,
            &request.toolchain,
            &request.build_config_name,
            &request.extra_options,
        )
    }
}
