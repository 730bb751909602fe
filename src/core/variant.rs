//! Build variant requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::diagnostic::VariaError;
use crate::util::process::split_args;

/// Extra CMake options attached to a variant.
///
/// Plan files may give these either as one string or as an array of
/// strings; both forms normalize to the same space-separated line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraOptions {
    /// No extra options.
    #[default]
    None,
    /// A single pre-joined option string, used verbatim.
    Scalar(String),
    /// A list of options, joined with single spaces.
    List(Vec<String>),
}

impl ExtraOptions {
    /// Collapse the options into the canonical option line.
    pub fn normalize(&self) -> String {
        match self {
            ExtraOptions::None => String::new(),
            ExtraOptions::Scalar(s) => s.clone(),
            ExtraOptions::List(items) => items.join(" "),
        }
    }

    /// Expand into CMake arguments.
    ///
    /// A scalar is split with shell quoting rules; list items are passed
    /// through whole.
    pub fn to_argv(&self) -> Result<Vec<String>, VariaError> {
        match self {
            ExtraOptions::None => Ok(Vec::new()),
            ExtraOptions::Scalar(line) => split_args(line),
            ExtraOptions::List(items) => Ok(items.clone()),
        }
    }

    /// Check if no options were given.
    pub fn is_none(&self) -> bool {
        matches!(self, ExtraOptions::None)
    }
}

impl From<&str> for ExtraOptions {
    fn from(s: &str) -> Self {
        ExtraOptions::Scalar(s.to_string())
    }
}

impl From<String> for ExtraOptions {
    fn from(s: String) -> Self {
        ExtraOptions::Scalar(s)
    }
}

impl From<Vec<String>> for ExtraOptions {
    fn from(items: Vec<String>) -> Self {
        ExtraOptions::List(items)
    }
}

impl<const N: usize> From<[&str; N]> for ExtraOptions {
    fn from(items: [&str; N]) -> Self {
        ExtraOptions::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// One desired build flavor: a toolchain plus a configuration name.
///
/// Neither field is validated; both are interpolated into the CMake
/// argument line as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariantRequest {
    /// Toolchain name passed as `-DTOOLCHAIN=`
    pub toolchain: String,
    /// Configuration name passed as `-DBUILD_CONFIG=`
    pub build_config_name: String,
    /// Additional options appended after the fixed flags
    pub extra_options: ExtraOptions,
}

impl BuildVariantRequest {
    /// Create a request with no extra options.
    pub fn new(toolchain: impl Into<String>, build_config_name: impl Into<String>) -> Self {
        BuildVariantRequest {
            toolchain: toolchain.into(),
            build_config_name: build_config_name.into(),
            extra_options: ExtraOptions::None,
        }
    }

    /// Attach extra options.
    pub fn with_options(mut self, options: impl Into<ExtraOptions>) -> Self {
        self.extra_options = options.into();
        self
    }
}

impl fmt::Display for BuildVariantRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.toolchain, self.build_config_name)
    }
}
