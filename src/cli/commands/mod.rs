//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Resolves paths and configuration
//! 3. Calls into the installer and formats output
//!
//! # Async Commands
//!
//! The release download is async because it involves network I/O. The
//! install handler builds a tokio runtime and blocks on it; everything
//! else is synchronous.

mod build;
mod completion;
mod install;
mod status;

// Re-export command functions for testing and direct invocation
pub use build::build;
pub use completion::completion;
pub use install::install;
pub use status::status;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Install {
            names,
            bundled,
            repo,
        } => install(ctx, &names, bundled, repo.as_deref()),
        Command::Build { names } => build(ctx, &names),
        Command::Status => status(ctx),
        Command::Completion { shell } => completion(shell),
    }
}
