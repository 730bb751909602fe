//! Build planning.
//!
//! The variant table, its build-directory layout and the CMake command
//! lines derived from it.

pub mod build_dir;
pub mod cmake;
pub mod plan;

pub use build_dir::{BuildDirOptions, BuildDirRule, ConfigNameDir};
pub use cmake::CMakeInvocation;
pub use plan::{BuildPlanRegistry, EnvVars, GlobalOptions, TaskConfig, Variant};
