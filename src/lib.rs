//! Varia - named CMake build variants
//!
//! This crate resolves a table of build variants (toolchain plus
//! configuration name) into CMake argument lines, and drives configure,
//! build and run steps for them.

pub mod builder;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildPlanRegistry, GlobalOptions};
pub use crate::core::{BuildTarget, BuildVariantRequest, CliArgs, ExtraOptions};
pub use resolver::{ResolvedArgs, VariantResolver};
pub use util::context::GlobalContext;
