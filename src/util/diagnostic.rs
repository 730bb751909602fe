//! User-facing errors.
//!
//! Every lookup failure names what was asked for and lists what exists, so
//! the user can correct the command line without opening the plan file.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors reported by the library.
#[derive(Debug, Error, Diagnostic)]
pub enum VariaError {
    #[error("unknown variant `{name}`")]
    #[diagnostic(code(varia::plan::unknown_variant), help("available variants: {available}"))]
    UnknownVariant { name: String, available: String },

    #[error("unknown run target `{name}`")]
    #[diagnostic(code(varia::plan::unknown_target), help("available targets: {available}"))]
    UnknownTarget { name: String, available: String },

    #[error("variant `{0}` is declared more than once")]
    #[diagnostic(code(varia::plan::duplicate_variant))]
    DuplicateVariant(String),

    #[error("plan declares no variants")]
    #[diagnostic(code(varia::plan::empty), help("add a [[variant]] table to Variants.toml"))]
    NoVariants,

    #[error("failed to read plan file: {}", .path.display())]
    #[diagnostic(code(varia::config::read))]
    ReadPlan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan file: {}", .path.display())]
    #[diagnostic(code(varia::config::parse), help("check Variants.toml against the output of `varia plan --format toml`"))]
    ParsePlan {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot split argument line `{line}`")]
    #[diagnostic(code(varia::args::malformed), help("check for an unbalanced quote or a trailing backslash"))]
    MalformedArgs { line: String },

    #[error("no CMakeLists.txt in {}", .dir.display())]
    #[diagnostic(code(varia::cmake::no_project), help("set `src_dir` in the [options] table of Variants.toml"))]
    NotCMakeProject { dir: PathBuf },

    #[error("CMake not found")]
    #[diagnostic(code(varia::cmake::not_found), help("install CMake and ensure it is in your PATH"))]
    CMakeNotFound,
}

/// Format a list of names for a help message.
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.into_iter().collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(["a", "b"]), "a, b");
        assert_eq!(join_names(Vec::<&str>::new()), "(none)");
    }

    #[test]
    fn test_unknown_variant_message() {
        let err = VariaError::UnknownVariant {
            name: "gcc-Debug".to_string(),
            available: join_names(["clang-Debug"]),
        };
        assert_eq!(err.to_string(), "unknown variant `gcc-Debug`");
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("available variants: clang-Debug"));
    }
}
