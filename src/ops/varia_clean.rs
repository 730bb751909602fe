//! Remove variant build directories.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::Variant;
use crate::ops::OpContext;
use crate::util::fs::remove_dir_all_if_exists;
use crate::util::shell::Status;

/// Options for `clean`.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub variant: Option<String>,
    /// Clean every declared variant
    pub all: bool,
}

/// Remove build directories. Returns the directories that were removed.
///
/// Variants sharing a build directory are only removed once.
pub fn clean(op: &OpContext<'_>, opts: &CleanOptions) -> Result<Vec<PathBuf>> {
    let variants: Vec<&Variant> = if opts.all {
        op.registry.variants().collect()
    } else {
        vec![op.registry.variant_or_default(opts.variant.as_deref())?]
    };

    let mut dirs: Vec<PathBuf> = Vec::new();
    for variant in variants {
        let dir = op.ctx.project_path(&op.registry.build_dir(variant));
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    let mut removed = Vec::new();
    for dir in dirs {
        if op.dry_run {
            println!("rm -rf {}", dir.display());
            continue;
        }
        if remove_dir_all_if_exists(&dir)? {
            op.shell.status(Status::Removed, dir.display());
            removed.push(dir);
        } else {
            op.shell.status(Status::Skipped, format!("{} (not present)", dir.display()));
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProject;

    #[test]
    fn test_clean_default_variant() {
        let project = TestProject::builtin();
        let debug = project.root().join("build/Debug");
        let release = project.root().join("build/Release");
        std::fs::create_dir_all(&debug).unwrap();
        std::fs::create_dir_all(&release).unwrap();

        let removed = clean(&project.op(false), &CleanOptions::default()).unwrap();

        assert_eq!(removed, vec![debug.clone()]);
        assert!(!debug.exists());
        assert!(release.exists());
    }

    #[test]
    fn test_clean_all_dedups_shared_dirs() {
        let project = TestProject::with_plan(
            r#"
[[variant]]
toolchain = "clang"
config = "Debug"

[[variant]]
toolchain = "gcc"
config = "Debug"
"#,
        );
        let debug = project.root().join("build/Debug");
        std::fs::create_dir_all(&debug).unwrap();

        let opts = CleanOptions {
            variant: None,
            all: true,
        };
        let removed = clean(&project.op(false), &opts).unwrap();

        assert_eq!(removed, vec![debug]);
    }

    #[test]
    fn test_clean_dry_run_keeps_files() {
        let project = TestProject::builtin();
        let debug = project.root().join("build/Debug");
        std::fs::create_dir_all(&debug).unwrap();

        let removed = clean(&project.op(true), &CleanOptions::default()).unwrap();

        assert!(removed.is_empty());
        assert!(debug.exists());
    }
}
