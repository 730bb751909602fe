//! Command implementations

pub mod args;
pub mod build;
pub mod clean;
pub mod completions;
pub mod configure;
pub mod list;
pub mod plan;
pub mod run;
