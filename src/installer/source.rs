//! installer::source
//!
//! Build delegate binaries from source with `cargo build --release` and
//! copy the artifacts into the install directory.
//!
//! Cargo's own output streams straight through to the terminal, so a
//! failing build shows the real compiler errors rather than a summary
//! of them.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::core::paths::StagehandPaths;
use crate::core::target::BinaryDescriptor;
use crate::installer::place_binary;
use crate::ui::output::{self, Verbosity};

/// The build manifest that gates the source fallback.
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Errors from building and installing from source.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to run cargo: {0}")]
    Spawn(std::io::Error),

    #[error("cargo build failed with {status}")]
    BuildFailed { status: ExitStatus },

    #[error("build succeeded but '{path}' is missing")]
    ArtifactMissing { path: PathBuf },

    #[error("failed to install '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Run a release build in `package_root` and install each delegate's
/// artifact.
pub fn build_and_install(
    names: &[String],
    package_root: &Path,
    paths: &StagehandPaths,
    verbosity: Verbosity,
) -> Result<(), BuildError> {
    output::print("Building release binaries...", verbosity);

    let status = Command::new("cargo")
        .current_dir(package_root)
        .args(["build", "--release"])
        .status()
        .map_err(BuildError::Spawn)?;
    if !status.success() {
        return Err(BuildError::BuildFailed { status });
    }

    paths.ensure_install_dir().map_err(|e| BuildError::Io {
        path: paths.install_dir(),
        source: e,
    })?;

    for name in names {
        let descriptor = BinaryDescriptor::host(name);
        let artifact = artifact_path(package_root, &descriptor);
        if !artifact.exists() {
            return Err(BuildError::ArtifactMissing { path: artifact });
        }

        let dest = paths.delegate_path(&descriptor.local_name());
        place_binary(&artifact, &dest).map_err(|e| BuildError::Io {
            path: dest.clone(),
            source: e,
        })?;

        output::success(format!("Installed {} from source build", name), verbosity);
    }

    Ok(())
}

/// Where a release build leaves the delegate's binary.
fn artifact_path(package_root: &Path, descriptor: &BinaryDescriptor) -> PathBuf {
    package_root
        .join("target")
        .join("release")
        .join(descriptor.local_name())
}
