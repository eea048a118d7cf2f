//! status command - Show install locations and delegate state

use crate::cli::Context;
use crate::core::paths::StagehandPaths;
use crate::core::target::BinaryDescriptor;
use crate::core::DELEGATES;
use anyhow::Result;

/// Run the status command.
pub fn status(_ctx: &Context) -> Result<()> {
    let paths = StagehandPaths::from_env()?;

    println!("home:        {}", paths.root().display());
    println!("install dir: {}", paths.install_dir().display());
    println!();

    for name in DELEGATES {
        let installed = paths.delegate_path(&BinaryDescriptor::host(*name).local_name());
        if installed.exists() {
            println!("{:<16} installed ({})", name, installed.display());
        } else {
            println!("{:<16} missing", name);
        }
    }

    Ok(())
}
