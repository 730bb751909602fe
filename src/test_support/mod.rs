//! Test fixtures shared by unit tests.

use std::path::Path;

use tempfile::TempDir;

use crate::builder::BuildPlanRegistry;
use crate::resolver::{RecordingSink, StaticProbe, VariantResolver};
use crate::util::config::PLAN_FILE_NAME;
use crate::util::context::GlobalContext;
use crate::util::shell::{ColorChoice, Shell, Verbosity};

/// Home directory used by fake probes.
pub const FAKE_HOME: &str = "/home/dev";

/// A project directory with an optional plan file.
pub struct TestProject {
    pub dir: TempDir,
    pub ctx: GlobalContext,
    pub registry: BuildPlanRegistry,
    pub shell: Shell,
}

impl TestProject {
    /// Project using the built-in plan.
    pub fn builtin() -> Self {
        Self::build(None)
    }

    /// Project with `plan` written to `Variants.toml`.
    pub fn with_plan(plan: &str) -> Self {
        Self::build(Some(plan))
    }

    fn build(plan: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        if let Some(plan) = plan {
            std::fs::write(dir.path().join(PLAN_FILE_NAME), plan).unwrap();
        }

        let ctx = GlobalContext::with_cwd(dir.path().to_path_buf());
        let sink = RecordingSink::new();
        let resolver = VariantResolver::new(StaticProbe::new(FAKE_HOME), &sink);
        let registry = ctx.load_plan().unwrap().build_registry(&resolver);

        TestProject {
            dir,
            ctx,
            registry,
            shell: Shell::new(Verbosity::Quiet, ColorChoice::Never),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn op(&self, dry_run: bool) -> crate::ops::OpContext<'_> {
        crate::ops::OpContext {
            ctx: &self.ctx,
            registry: &self.registry,
            shell: &self.shell,
            dry_run,
        }
    }
}
