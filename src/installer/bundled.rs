//! installer::bundled
//!
//! Install delegate binaries shipped inside the package itself.
//!
//! Some distributions carry prebuilt binaries under a `binaries/`
//! directory next to the package manifest. This variant copies the one
//! matching the host platform into the install directory. There is no
//! fallback: a missing bundled binary is a packaging defect, so the
//! error lists what the directory actually contains.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::StagehandPaths;
use crate::core::target::BinaryDescriptor;
use crate::installer::place_binary;
use crate::ui::output::{self, Verbosity};

/// Directory under the package root holding shipped binaries.
pub const BUNDLED_DIR: &str = "binaries";

/// Errors from the bundled-install path.
#[derive(Debug, Error)]
pub enum BundledError {
    #[error("no bundled binary '{name}' under '{dir}'")]
    Missing { name: String, dir: PathBuf },

    #[error("failed to install '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Copy the bundled binary for each delegate into the install directory.
pub fn install_bundled(
    names: &[String],
    package_root: &Path,
    paths: &StagehandPaths,
    verbosity: Verbosity,
) -> Result<(), BundledError> {
    let bundled_dir = package_root.join(BUNDLED_DIR);

    paths.ensure_install_dir().map_err(|e| BundledError::Io {
        path: paths.install_dir(),
        source: e,
    })?;

    for name in names {
        let descriptor = BinaryDescriptor::host(name);
        let asset_name = descriptor.asset_name();
        let src = bundled_dir.join(&asset_name);

        if !src.exists() {
            report_missing(&asset_name, &bundled_dir);
            return Err(BundledError::Missing {
                name: asset_name,
                dir: bundled_dir,
            });
        }

        let dest = paths.delegate_path(&descriptor.local_name());
        place_binary(&src, &dest).map_err(|e| BundledError::Io {
            path: dest.clone(),
            source: e,
        })?;

        output::success(
            format!("Installed {} from bundled binaries", name),
            verbosity,
        );
    }

    Ok(())
}

/// Spell out what was expected and what is actually there.
fn report_missing(asset_name: &str, bundled_dir: &Path) {
    eprintln!("Expected bundled binary: {}", asset_name);
    eprintln!("Searched in: {}", bundled_dir.display());

    let present = list_bundled(bundled_dir);
    if present.is_empty() {
        eprintln!("No bundled binaries found.");
    } else {
        eprintln!("Bundled binaries present:");
        for entry in present {
            eprintln!("    {}", entry);
        }
    }
}

/// File names under the bundled directory, sorted. Unreadable directories
/// read as empty.
fn list_bundled(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
