//! Core data types: variant requests and build-and-run targets.

pub mod target;
pub mod variant;

pub use target::{BuildTarget, CliArgs};
pub use variant::{BuildVariantRequest, ExtraOptions};
