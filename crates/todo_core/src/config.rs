//! Store configuration injected at construction.
//!
//! # Responsibility
//! - Carry the store file location and input policy into codec/store.
//! - Resolve the per-user default location without process-wide state.
//!
//! # Invariants
//! - The core never reads environment variables for its file path.
//! - One store file per installation; the file name is fixed.

use std::path::{Path, PathBuf};

/// File name used inside the application data directory.
pub const STORE_FILE_NAME: &str = "TodoList.json";

/// Configuration for one item store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Full path of the JSON store file.
    pub path: PathBuf,
    /// Reject add/update with empty or whitespace-only text.
    ///
    /// Off by default: the app has always accepted blank items.
    pub reject_blank_text: bool,
}

impl StoreConfig {
    /// Uses an explicit store file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reject_blank_text: false,
        }
    }

    /// Uses `TodoList.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORE_FILE_NAME))
    }

    /// Resolves `<local data dir>/TodoList.json` for the current user.
    ///
    /// Returns `None` when the platform exposes no local data directory.
    pub fn default_location() -> Option<Self> {
        dirs::data_local_dir().map(Self::in_dir)
    }

    /// Builder-style toggle for the blank-text policy.
    pub fn with_reject_blank_text(mut self, reject: bool) -> Self {
        self.reject_blank_text = reject;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, STORE_FILE_NAME};
    use std::path::Path;

    #[test]
    fn in_dir_appends_fixed_file_name() {
        let config = StoreConfig::in_dir("/data/app");
        assert_eq!(config.path, Path::new("/data/app").join(STORE_FILE_NAME));
        assert!(!config.reject_blank_text);
    }

    #[test]
    fn builder_sets_blank_policy() {
        let config = StoreConfig::new("/tmp/x.json").with_reject_blank_text(true);
        assert!(config.reject_blank_text);
    }
}
