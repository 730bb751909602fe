//! Build-directory layout rules.

use std::path::{Path, PathBuf};

/// The options a build-directory rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildDirOptions<'a> {
    /// Variant key (e.g., "clang-Debug")
    pub variant: &'a str,
    pub toolchain: &'a str,
    pub build_config_name: &'a str,
}

/// Maps a variant's options to its build directory.
///
/// The rule is evaluated lazily each time a build directory is needed, so
/// plans can be declared before the layout is known. Any
/// `Fn(&BuildDirOptions) -> PathBuf` is a rule.
pub trait BuildDirRule {
    fn build_dir(&self, opts: &BuildDirOptions<'_>) -> PathBuf;
}

impl<F> BuildDirRule for F
where
    F: Fn(&BuildDirOptions<'_>) -> PathBuf,
{
    fn build_dir(&self, opts: &BuildDirOptions<'_>) -> PathBuf {
        self(opts)
    }
}

/// `<root>/<build_config_name>`, with `build` as the default root.
///
/// Variants that share a configuration name share a build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNameDir {
    root: PathBuf,
}

impl ConfigNameDir {
    pub const DEFAULT_ROOT: &'static str = "build";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        ConfigNameDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for ConfigNameDir {
    fn default() -> Self {
        ConfigNameDir::new(Self::DEFAULT_ROOT)
    }
}

impl BuildDirRule for ConfigNameDir {
    fn build_dir(&self, opts: &BuildDirOptions<'_>) -> PathBuf {
        self.root.join(opts.build_config_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTS: BuildDirOptions<'static> = BuildDirOptions {
        variant: "clang-Debug",
        toolchain: "clang",
        build_config_name: "Debug",
    };

    #[test]
    fn test_config_name_dir() {
        assert_eq!(ConfigNameDir::default().build_dir(&OPTS), PathBuf::from("build/Debug"));
        assert_eq!(ConfigNameDir::new("out").build_dir(&OPTS), PathBuf::from("out/Debug"));
    }

    fn per_variant(opts: &BuildDirOptions<'_>) -> PathBuf {
        PathBuf::from("build").join(opts.variant)
    }

    #[test]
    fn test_fn_rule() {
        assert_eq!(per_variant.build_dir(&OPTS), PathBuf::from("build/clang-Debug"));
    }
}
