//! Side-effecting capabilities used by the variant resolver.
//!
//! The resolver never reads the home directory or prints on its own; it goes
//! through these traits so tests can substitute fakes.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Filesystem queries needed to locate the override file.
pub trait FsProbe {
    /// The user's home directory, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Destination for non-fatal resolver warnings.
pub trait WarningSink {
    fn warn(&self, message: &str);
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl FsProbe for SystemProbe {
    fn home_dir(&self) -> Option<PathBuf> {
        directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Sink that forwards warnings to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Probe with a fixed home directory and a fixed set of existing paths.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    home: Option<PathBuf>,
    existing: Vec<PathBuf>,
}

impl StaticProbe {
    /// Create a probe rooted at `home` with no existing files.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        StaticProbe {
            home: Some(home.into()),
            existing: Vec::new(),
        }
    }

    /// Create a probe with no home directory.
    pub fn homeless() -> Self {
        StaticProbe::default()
    }

    /// Mark a path as existing.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.existing.push(path.into());
        self
    }
}

impl FsProbe for StaticProbe {
    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path)
    }
}

/// Sink that keeps every warning in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink::default()
    }

    /// Warnings recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl WarningSink for RecordingSink {
    fn warn(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

impl<T: FsProbe + ?Sized> FsProbe for &T {
    fn home_dir(&self) -> Option<PathBuf> {
        (**self).home_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

impl<T: WarningSink + ?Sized> WarningSink for &T {
    fn warn(&self, message: &str) {
        (**self).warn(message)
    }
}
