//! install command - Acquire delegate binaries

use crate::cli::Context;
use crate::core::config::ReleaseSource;
use crate::core::paths::StagehandPaths;
use crate::core::resolve_delegates;
use crate::installer::bundled::install_bundled;
use crate::installer::install_from_release;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Run the install command.
///
/// This is a synchronous wrapper that uses tokio to run the async
/// download path. The bundled path does no network I/O and runs directly.
pub fn install(ctx: &Context, names: &[String], bundled: bool, repo: Option<&str>) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let delegates = resolve_delegates(names);
    let package_root = ctx.package_root()?;
    let paths = StagehandPaths::from_env()?;

    if bundled {
        install_bundled(&delegates, &package_root, &paths, verbosity)?;
        return Ok(());
    }

    let release_source =
        ReleaseSource::resolve(&paths, repo).context("failed to resolve release source")?;

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(install_from_release(
        &delegates,
        &release_source,
        &package_root,
        &paths,
        verbosity,
    ))?;
    output::debug(format!("install outcome: {:?}", outcome), verbosity);

    Ok(())
}
