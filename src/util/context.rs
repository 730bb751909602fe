//! Global context for varia operations.
//!
//! Locates the project root and its plan file. The project root is the
//! nearest ancestor of the working directory that holds a `Variants.toml`,
//! or the working directory itself when there is none.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::BuildPlanRegistry;
use crate::resolver::VariantResolver;
use crate::util::config::{PlanFile, PLAN_FILE_NAME};

/// Global context containing paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory that plan-relative paths are resolved against
    project_root: PathBuf,

    /// Plan file location (may not exist unless given explicitly)
    plan_path: PathBuf,

    /// The plan path came from the command line or environment
    explicit: bool,
}

impl GlobalContext {
    /// Context for the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Context for a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let plan_path = find_plan(&cwd).unwrap_or_else(|| cwd.join(PLAN_FILE_NAME));
        let project_root = plan_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        GlobalContext {
            cwd,
            project_root,
            plan_path,
            explicit: false,
        }
    }

    /// Context for an explicit plan file path, which must exist.
    pub fn with_plan_path(cwd: PathBuf, plan_path: PathBuf) -> Self {
        let plan_path = if plan_path.is_absolute() {
            plan_path
        } else {
            cwd.join(plan_path)
        };
        let project_root = plan_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        GlobalContext {
            cwd,
            project_root,
            plan_path,
            explicit: true,
        }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the plan file path.
    pub fn plan_path(&self) -> &Path {
        &self.plan_path
    }

    /// Resolve a plan-relative path against the project root.
    pub fn project_path(&self, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            self.project_root.join(relative)
        }
    }

    /// Load the plan file.
    ///
    /// A discovered location falls back to the built-in plan when no file
    /// exists; an explicit path must name a readable file.
    pub fn load_plan(&self) -> Result<PlanFile> {
        let plan = if self.explicit {
            PlanFile::load(&self.plan_path)?
        } else {
            PlanFile::load_or_builtin(&self.plan_path)?
        };
        Ok(plan)
    }

    /// Load the plan and resolve it against the real filesystem.
    pub fn registry(&self) -> Result<BuildPlanRegistry> {
        let plan = self.load_plan()?;
        Ok(plan.build_registry(&VariantResolver::system()))
    }
}

/// Find `Variants.toml` starting from `start` and searching upward.
pub fn find_plan(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PLAN_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::diagnostic::VariaError;
    use tempfile::TempDir;

    #[test]
    fn test_no_plan_uses_cwd() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        assert_eq!(ctx.project_root(), tmp.path());
        assert_eq!(ctx.plan_path(), tmp.path().join(PLAN_FILE_NAME));
        assert_eq!(ctx.load_plan().unwrap(), PlanFile::builtin());
    }

    #[test]
    fn test_plan_found_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(PLAN_FILE_NAME),
            "[[variant]]\ntoolchain = \"gcc\"\nconfig = \"Debug\"\n",
        )
        .unwrap();
        let nested = tmp.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested.clone());
        assert_eq!(ctx.project_root(), tmp.path());
        assert_eq!(ctx.cwd(), nested.as_path());
        assert_eq!(
            ctx.project_path(Path::new("build/Debug")),
            tmp.path().join("build/Debug")
        );
        assert_eq!(ctx.load_plan().unwrap().variants[0].key(), "gcc-Debug");
    }

    #[test]
    fn test_explicit_plan_path() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_plan_path(
            tmp.path().to_path_buf(),
            PathBuf::from("sub/plan.toml"),
        );

        assert_eq!(ctx.plan_path(), tmp.path().join("sub/plan.toml"));
        assert_eq!(ctx.project_root(), tmp.path().join("sub"));
    }

    #[test]
    fn test_missing_explicit_plan_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_plan_path(tmp.path().to_path_buf(), PathBuf::from("typo.toml"));

        let err = ctx.load_plan().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VariaError>(),
            Some(VariaError::ReadPlan { .. })
        ));

        std::fs::write(
            tmp.path().join("typo.toml"),
            "[[variant]]\ntoolchain = \"gcc\"\nconfig = \"Debug\"\n",
        )
        .unwrap();
        assert_eq!(ctx.load_plan().unwrap().variants[0].key(), "gcc-Debug");
    }
}
