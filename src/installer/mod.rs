//! installer
//!
//! Acquisition of delegate binaries: release download with source-build
//! fallback, plus a bundled-copy variant.
//!
//! # Flow
//!
//! [`install_from_release`] drives the default path:
//!
//! 1. Fetch latest-release metadata for the configured repository
//! 2. Download the matching asset for every requested delegate
//! 3. Mark the installed files executable (Unix)
//!
//! Any failure in that sequence falls back to building from source, gated
//! on a build manifest being present in the package root. Without one the
//! installer prints manual build steps and fails; a silent failure would
//! leave the launchers pointing at nothing.
//!
//! The bundled variant ([`bundled::install_bundled`]) copies binaries
//! shipped with the package and has no fallback of its own.
//!
//! [`install_from_release`]: install_from_release

pub mod bundled;
pub mod source;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::ReleaseSource;
use crate::core::paths::StagehandPaths;
use crate::core::target::BinaryDescriptor;
use crate::release::{ReleaseClient, ReleaseError};
use crate::ui::output::{self, Verbosity};

use source::{build_and_install, BuildError, MANIFEST_FILE};

/// Errors from installation.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error("failed to create install directory '{path}': {source}")]
    InstallDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to mark '{path}' executable: {source}")]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot build from source: Cargo.toml not found in '{package_root}'")]
    NoBuildManifest { package_root: PathBuf },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// What the installer ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Binaries were downloaded from the given release tag.
    Downloaded { tag: String },
    /// The download path failed; binaries were built from source.
    BuiltFromSource,
}

/// Install delegate binaries from the latest release, falling back to a
/// source build when any part of the download path fails.
pub async fn install_from_release(
    names: &[String],
    release_source: &ReleaseSource,
    package_root: &Path,
    paths: &StagehandPaths,
    verbosity: Verbosity,
) -> Result<InstallOutcome, InstallError> {
    match try_download(names, release_source, paths, verbosity).await {
        Ok(tag) => Ok(InstallOutcome::Downloaded { tag }),
        Err(err) => {
            output::warn(
                format!("failed to download release binaries: {}", err),
                verbosity,
            );
            output::print("Falling back to building from source...", verbosity);
            fallback_build(names, package_root, paths, verbosity)?;
            Ok(InstallOutcome::BuiltFromSource)
        }
    }
}

/// The download path: one metadata fetch, then one download per delegate.
async fn try_download(
    names: &[String],
    release_source: &ReleaseSource,
    paths: &StagehandPaths,
    verbosity: Verbosity,
) -> Result<String, InstallError> {
    let client = ReleaseClient::with_api_base(&release_source.api_base)?;

    output::print(
        format!(
            "Fetching latest release of {}/{}...",
            release_source.owner, release_source.repo
        ),
        verbosity,
    );
    let release = client
        .latest_release(&release_source.owner, &release_source.repo)
        .await?;
    output::debug(format!("release tag: {}", release.tag_name), verbosity);

    paths
        .ensure_install_dir()
        .map_err(|e| InstallError::InstallDir {
            path: paths.install_dir(),
            source: e,
        })?;

    for name in names {
        let descriptor = BinaryDescriptor::host(name);
        let asset_name = descriptor.asset_name();
        let asset = release
            .find_asset(&asset_name)
            .ok_or_else(|| ReleaseError::AssetNotFound {
                name: asset_name.clone(),
                tag: release.tag_name.clone(),
            })?;

        output::print(format!("Downloading {}...", asset_name), verbosity);
        let dest = paths.delegate_path(&descriptor.local_name());
        client.download_asset(asset, &dest).await?;
        make_executable(&dest).map_err(|e| InstallError::Permissions {
            path: dest.clone(),
            source: e,
        })?;

        output::success(
            format!("Successfully installed {} {}", name, release.tag_name),
            verbosity,
        );
    }

    Ok(release.tag_name)
}

/// The fallback path: require a build manifest, then build and install.
///
/// Without a manifest there is nothing to build, so the manual steps are
/// printed before failing.
fn fallback_build(
    names: &[String],
    package_root: &Path,
    paths: &StagehandPaths,
    verbosity: Verbosity,
) -> Result<(), InstallError> {
    let manifest = package_root.join(MANIFEST_FILE);
    if !manifest.exists() {
        eprintln!("To install manually:");
        eprintln!("    1. Install Rust: https://www.rust-lang.org/tools/install");
        eprintln!("    2. Clone the repository");
        eprintln!("    3. Run: cargo build --release");
        return Err(InstallError::NoBuildManifest {
            package_root: package_root.to_path_buf(),
        });
    }

    build_and_install(names, package_root, paths, verbosity)?;
    Ok(())
}

/// Mark an installed binary executable.
///
/// Windows determines executability by extension, so this is Unix-only.
#[cfg(unix)]
pub(crate) fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
pub(crate) fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Copy `src` into place at `dest` via a `.tmp` sibling.
///
/// The temp file is marked executable before the rename, so the finished
/// binary appears at `dest` in one step.
pub(crate) fn place_binary(src: &Path, dest: &Path) -> std::io::Result<()> {
    let temp_path = dest.with_extension("tmp");
    std::fs::copy(src, &temp_path)?;
    make_executable(&temp_path)?;
    std::fs::rename(&temp_path, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn place_binary_copies_and_replaces() {
        let temp = TempDir::new().expect("create temp dir");
        let src = temp.path().join("artifact");
        let dest = temp.path().join("installed");
        std::fs::write(&src, b"first").unwrap();

        place_binary(&src, &dest).expect("place");
        assert_eq!(std::fs::read(&dest).unwrap(), b"first");

        // Replacing an existing install works.
        std::fs::write(&src, b"second").unwrap();
        place_binary(&src, &dest).expect("replace");
        assert_eq!(std::fs::read(&dest).unwrap(), b"second");

        // No temp file is left behind.
        assert!(!temp.path().join("installed.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn place_binary_marks_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("create temp dir");
        let src = temp.path().join("artifact");
        let dest = temp.path().join("installed");
        std::fs::write(&src, b"#!/bin/sh\n").unwrap();

        place_binary(&src, &dest).expect("place");

        let mode = std::fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }

    #[test]
    fn no_build_manifest_error_names_the_root() {
        let err = InstallError::NoBuildManifest {
            package_root: PathBuf::from("/work/pkg"),
        };
        let text = err.to_string();
        assert!(text.contains("Cargo.toml"));
        assert!(text.contains("/work/pkg"));
    }
}
