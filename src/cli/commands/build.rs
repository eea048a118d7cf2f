//! build command - Build delegates from source

use crate::cli::Context;
use crate::core::paths::StagehandPaths;
use crate::core::resolve_delegates;
use crate::installer::source::build_and_install;
use crate::ui::output::Verbosity;
use anyhow::Result;

/// Run the build command.
pub fn build(ctx: &Context, names: &[String]) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let delegates = resolve_delegates(names);
    let package_root = ctx.package_root()?;
    let paths = StagehandPaths::from_env()?;

    build_and_install(&delegates, &package_root, &paths, verbosity)?;
    Ok(())
}
