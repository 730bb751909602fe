//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;
pub mod process;
pub mod shell;

pub use config::PlanFile;
pub use context::GlobalContext;
pub use diagnostic::VariaError;
pub use shell::Shell;
