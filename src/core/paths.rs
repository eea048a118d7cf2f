//! core::paths
//!
//! Centralized path routing for Stagehand storage locations.
//!
//! # Architecture
//!
//! Launchers resolve delegates from the same directory the installer
//! writes to, so both must compute locations identically. All Stagehand
//! storage goes through [`StagehandPaths`]; no code outside this module
//! may join these paths by hand.
//!
//! # Storage Layout
//!
//! All Stagehand data lives under a single home directory:
//! - `bin/` - installed delegate executables
//! - `config.toml` - user configuration
//!
//! The home is `$STAGEHAND_HOME` if set, else `~/.stagehand`. Keeping the
//! install directory under the home rather than the package checkout means
//! launchers work from any working directory.
//!
//! # Example
//!
//! ```
//! use stagehand::core::paths::StagehandPaths;
//! use std::path::PathBuf;
//!
//! let paths = StagehandPaths::with_root(PathBuf::from("/home/dev/.stagehand"));
//!
//! assert_eq!(
//!     paths.delegate_path("commit_message"),
//!     PathBuf::from("/home/dev/.stagehand/bin/commit_message")
//! );
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the Stagehand home directory.
pub const HOME_ENV: &str = "STAGEHAND_HOME";

/// Errors from path resolution.
#[derive(Debug, Error)]
pub enum PathsError {
    #[error("home directory not found; set {HOME_ENV} to choose an install location")]
    NoHomeDir,
}

/// Centralized path routing for Stagehand storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagehandPaths {
    /// Root directory for all Stagehand state.
    root: PathBuf,
}

impl StagehandPaths {
    /// Resolve paths from the environment.
    ///
    /// Honors `$STAGEHAND_HOME`; falls back to `~/.stagehand`.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::NoHomeDir`] when neither the override nor a
    /// home directory is available.
    pub fn from_env() -> Result<Self, PathsError> {
        if let Some(root) = std::env::var_os(HOME_ENV) {
            return Ok(Self {
                root: PathBuf::from(root),
            });
        }

        let home = dirs::home_dir().ok_or(PathsError::NoHomeDir)?;
        Ok(Self {
            root: home.join(".stagehand"),
        })
    }

    /// Create paths rooted at an explicit directory.
    ///
    /// This is primarily useful for testing.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// The Stagehand home directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding installed delegate executables.
    ///
    /// This is `<home>/bin/`.
    pub fn install_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Install path for a delegate with the given file name.
    ///
    /// This is `<home>/bin/<file_name>`.
    pub fn delegate_path(&self, file_name: &str) -> PathBuf {
        self.install_dir().join(file_name)
    }

    /// Path to the user configuration file.
    ///
    /// This is `<home>/config.toml`. The `$STAGEHAND_CONFIG` override is
    /// applied by the config loader, not here.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Ensure the install directory exists.
    ///
    /// # Errors
    ///
    /// Returns an IO error if directory creation fails.
    pub fn ensure_install_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.install_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_root_sets_root() {
        let paths = StagehandPaths::with_root(PathBuf::from("/opt/stagehand"));
        assert_eq!(paths.root(), Path::new("/opt/stagehand"));
    }

    #[test]
    fn install_dir_under_root() {
        let paths = StagehandPaths::with_root(PathBuf::from("/opt/stagehand"));
        assert_eq!(paths.install_dir(), PathBuf::from("/opt/stagehand/bin"));
    }

    #[test]
    fn delegate_path_joins_file_name() {
        let paths = StagehandPaths::with_root(PathBuf::from("/opt/stagehand"));
        assert_eq!(
            paths.delegate_path("commit_message"),
            PathBuf::from("/opt/stagehand/bin/commit_message")
        );
        assert_eq!(
            paths.delegate_path("pull_requests.exe"),
            PathBuf::from("/opt/stagehand/bin/pull_requests.exe")
        );
    }

    #[test]
    fn config_path_under_root() {
        let paths = StagehandPaths::with_root(PathBuf::from("/opt/stagehand"));
        assert_eq!(
            paths.config_path(),
            PathBuf::from("/opt/stagehand/config.toml")
        );
    }

    #[test]
    fn ensure_install_dir_creates_bin() {
        let temp = tempfile::TempDir::new().expect("create temp dir");
        let paths = StagehandPaths::with_root(temp.path().join("home"));

        assert!(!paths.install_dir().exists());
        paths.ensure_install_dir().expect("ensure install dir");
        assert!(paths.install_dir().is_dir());

        // Idempotent.
        paths.ensure_install_dir().expect("ensure again");
    }
}
