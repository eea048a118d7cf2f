//! core::config
//!
//! Release source configuration and loading.
//!
//! # Overview
//!
//! The installer downloads delegate binaries from the latest release of a
//! configurable repository. This module resolves which repository and API
//! host to use.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults (the upstream project that publishes the delegates)
//! 2. Config file
//! 3. Environment (`STAGEHAND_RELEASE_REPO`, `STAGEHAND_API_BASE`)
//! 4. CLI flags (`--repo`)
//!
//! # Config File Locations
//!
//! Searched in order:
//! 1. `$STAGEHAND_CONFIG` if set
//! 2. `<home>/config.toml`
//!
//! Missing config files are not an error (defaults are used). Malformed
//! ones are, and the error names the offending path.
//!
//! # Example
//!
//! ```toml
//! # ~/.stagehand/config.toml
//! [release]
//! owner = "myorg"
//! repo = "pull_requests"
//! api-base = "https://github.example.com/api/v3"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::paths::StagehandPaths;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "STAGEHAND_CONFIG";

/// Environment variable overriding the release repository (`<owner>/<name>`).
pub const REPO_ENV: &str = "STAGEHAND_RELEASE_REPO";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "STAGEHAND_API_BASE";

/// Default release source: the upstream project publishing the delegates.
const DEFAULT_OWNER: &str = "adalbertoteixeira";
const DEFAULT_REPO: &str = "pull_requests";
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid repository spec '{0}': expected <owner>/<name>")]
    InvalidRepoSpec(String),
}

/// Where release binaries are downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSource {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// API base URL (configurable for GitHub Enterprise and for tests).
    pub api_base: String,
}

impl Default for ReleaseSource {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ReleaseSource {
    /// Resolve the release source with full precedence applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if a repository spec is malformed.
    pub fn resolve(
        paths: &StagehandPaths,
        repo_flag: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let file = ConfigFile::load(paths)?;
        let env_repo = std::env::var(REPO_ENV).ok();
        let env_api_base = std::env::var(API_BASE_ENV).ok();

        Self::resolve_from(
            file,
            env_repo.as_deref(),
            env_api_base.as_deref(),
            repo_flag,
        )
    }

    /// Apply precedence over explicit inputs.
    ///
    /// Separated from [`resolve`] so precedence is testable without
    /// touching the process environment.
    ///
    /// [`resolve`]: ReleaseSource::resolve
    fn resolve_from(
        file: Option<ConfigFile>,
        env_repo: Option<&str>,
        env_api_base: Option<&str>,
        repo_flag: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut source = Self::default();

        if let Some(release) = file.and_then(|f| f.release) {
            if let Some(owner) = release.owner {
                source.owner = owner;
            }
            if let Some(repo) = release.repo {
                source.repo = repo;
            }
            if let Some(api_base) = release.api_base {
                source.api_base = api_base;
            }
        }

        if let Some(spec) = env_repo {
            source.apply_repo_spec(spec)?;
        }
        if let Some(base) = env_api_base {
            source.api_base = base.to_string();
        }

        if let Some(spec) = repo_flag {
            source.apply_repo_spec(spec)?;
        }

        Ok(source)
    }

    fn apply_repo_spec(&mut self, spec: &str) -> Result<(), ConfigError> {
        let (owner, repo) = parse_repo_spec(spec)?;
        self.owner = owner;
        self.repo = repo;
        Ok(())
    }
}

/// Parse an `<owner>/<name>` repository spec.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidRepoSpec`] unless the spec is exactly two
/// non-empty segments joined by one `/`.
pub fn parse_repo_spec(spec: &str) -> Result<(String, String), ConfigError> {
    let mut parts = spec.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepoSpec(spec.to_string())),
    }
}

/// On-disk configuration file schema.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// `[release]` table.
    pub release: Option<ReleaseConfig>,
}

/// `[release]` table of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseConfig {
    /// Repository owner.
    pub owner: Option<String>,
    /// Repository name.
    pub repo: Option<String>,
    /// Alternate API host, e.g. a GitHub Enterprise installation.
    #[serde(rename = "api-base")]
    pub api_base: Option<String>,
}

impl ConfigFile {
    /// Load the config file if present.
    ///
    /// Honors `$STAGEHAND_CONFIG`; falls back to `<home>/config.toml`.
    pub fn load(paths: &StagehandPaths) -> Result<Option<Self>, ConfigError> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => paths.config_path(),
        };
        Self::load_from(&path)
    }

    /// Load a config file from an explicit path.
    ///
    /// A missing file yields `None`; an unreadable or malformed file is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Some(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_repo_spec {
        use super::*;

        #[test]
        fn owner_and_name() {
            let (owner, repo) = parse_repo_spec("acme/widget").unwrap();
            assert_eq!(owner, "acme");
            assert_eq!(repo, "widget");
        }

        #[test]
        fn rejects_missing_separator() {
            assert!(parse_repo_spec("acmewidget").is_err());
        }

        #[test]
        fn rejects_empty_segments() {
            assert!(parse_repo_spec("/widget").is_err());
            assert!(parse_repo_spec("acme/").is_err());
            assert!(parse_repo_spec("/").is_err());
            assert!(parse_repo_spec("").is_err());
        }

        #[test]
        fn rejects_extra_segments() {
            assert!(parse_repo_spec("acme/widget/extra").is_err());
        }

        #[test]
        fn error_names_the_spec() {
            let err = parse_repo_spec("nonsense").unwrap_err();
            assert!(err.to_string().contains("nonsense"));
        }
    }

    mod precedence {
        use super::*;

        fn file_with(owner: Option<&str>, repo: Option<&str>, api: Option<&str>) -> ConfigFile {
            ConfigFile {
                release: Some(ReleaseConfig {
                    owner: owner.map(String::from),
                    repo: repo.map(String::from),
                    api_base: api.map(String::from),
                }),
            }
        }

        #[test]
        fn defaults_without_any_source() {
            let source = ReleaseSource::resolve_from(None, None, None, None).unwrap();
            assert_eq!(source, ReleaseSource::default());
            assert_eq!(source.owner, "adalbertoteixeira");
            assert_eq!(source.repo, "pull_requests");
            assert_eq!(source.api_base, "https://api.github.com");
        }

        #[test]
        fn file_overrides_defaults() {
            let file = file_with(Some("acme"), None, None);
            let source = ReleaseSource::resolve_from(Some(file), None, None, None).unwrap();
            assert_eq!(source.owner, "acme");
            // Unset fields keep their defaults.
            assert_eq!(source.repo, "pull_requests");
        }

        #[test]
        fn env_overrides_file() {
            let file = file_with(Some("acme"), Some("widget"), Some("https://file.example"));
            let source = ReleaseSource::resolve_from(
                Some(file),
                Some("envorg/envrepo"),
                Some("https://env.example"),
                None,
            )
            .unwrap();
            assert_eq!(source.owner, "envorg");
            assert_eq!(source.repo, "envrepo");
            assert_eq!(source.api_base, "https://env.example");
        }

        #[test]
        fn flag_overrides_env() {
            let source = ReleaseSource::resolve_from(
                None,
                Some("envorg/envrepo"),
                None,
                Some("flagorg/flagrepo"),
            )
            .unwrap();
            assert_eq!(source.owner, "flagorg");
            assert_eq!(source.repo, "flagrepo");
        }

        #[test]
        fn bad_env_spec_is_an_error() {
            let result = ReleaseSource::resolve_from(None, Some("nonsense"), None, None);
            assert!(result.is_err());
        }
    }

    mod config_file {
        use super::*;

        #[test]
        fn load_from_missing_file_is_none() {
            let temp = tempfile::TempDir::new().expect("create temp dir");
            let result = ConfigFile::load_from(&temp.path().join("config.toml")).unwrap();
            assert!(result.is_none());
        }

        #[test]
        fn load_from_parses_release_table() {
            let temp = tempfile::TempDir::new().expect("create temp dir");
            let path = temp.path().join("config.toml");
            std::fs::write(
                &path,
                "[release]\nowner = \"acme\"\nrepo = \"widget\"\napi-base = \"https://ghe.example/api/v3\"\n",
            )
            .unwrap();

            let file = ConfigFile::load_from(&path).unwrap().unwrap();
            let release = file.release.unwrap();
            assert_eq!(release.owner.as_deref(), Some("acme"));
            assert_eq!(release.repo.as_deref(), Some("widget"));
            assert_eq!(release.api_base.as_deref(), Some("https://ghe.example/api/v3"));
        }

        #[test]
        fn load_from_empty_file_is_all_none() {
            let temp = tempfile::TempDir::new().expect("create temp dir");
            let path = temp.path().join("config.toml");
            std::fs::write(&path, "").unwrap();

            let file = ConfigFile::load_from(&path).unwrap().unwrap();
            assert!(file.release.is_none());
        }

        #[test]
        fn malformed_file_error_names_path() {
            let temp = tempfile::TempDir::new().expect("create temp dir");
            let path = temp.path().join("config.toml");
            std::fs::write(&path, "[release\nowner = ").unwrap();

            let err = ConfigFile::load_from(&path).unwrap_err();
            assert!(err.to_string().contains("config.toml"), "got: {}", err);
        }
    }
}
