//! launcher
//!
//! Thin process launcher for installed delegate binaries.
//!
//! # Design
//!
//! The `commit_message` and `pull_requests` executables are shims: they
//! resolve the real binary under the Stagehand install directory, spawn
//! it with inherited stdio and environment, and mirror its termination.
//! The launcher interprets no flags of its own; every argument passes
//! through untouched, and the delegate's output is never inspected.
//!
//! # Termination Mirroring
//!
//! - Delegate exits with a code: the launcher exits with the same code.
//! - Delegate dies by a signal (Unix): the launcher restores the default
//!   disposition for that signal and re-raises it on itself, so the
//!   parent observes the same termination mode (including core dumps).
//!   A signal is never translated into an exit code.
//!
//! The disposition reset matters: the Rust runtime starts with SIGPIPE
//! ignored, so re-raising it without the reset would be a no-op.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::core::paths::{PathsError, StagehandPaths};
use crate::core::target::BinaryDescriptor;

/// Failure to start a delegate binary.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Paths(#[from] PathsError),

    #[error("failed to start '{path}': {source}")]
    Spawn {
        path: PathBuf,
        source: io::Error,
    },
}

/// Locate, spawn, and mirror a delegate binary. Never returns.
pub fn run(name: &str) -> ! {
    match launch(name) {
        Ok(status) => exit_like(status),
        Err(err) => {
            report(name, &err);
            std::process::exit(1);
        }
    }
}

/// Spawn the delegate with this process's arguments and wait for it.
///
/// Stdin, stdout, stderr, and the environment are inherited untouched.
fn launch(name: &str) -> Result<ExitStatus, LaunchError> {
    let paths = StagehandPaths::from_env()?;
    let delegate = paths.delegate_path(&BinaryDescriptor::host(name).local_name());

    Command::new(&delegate)
        .args(std::env::args_os().skip(1))
        .status()
        .map_err(|e| LaunchError::Spawn {
            path: delegate,
            source: e,
        })
}

/// Print launch failure guidance to stderr.
///
/// A missing delegate gets reinstall guidance instead of a raw OS error;
/// everything else reports the underlying failure.
fn report(name: &str, err: &LaunchError) {
    match err {
        LaunchError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => {
            eprintln!("{} binary not found!", name);
            eprintln!("Please try reinstalling the delegate binaries:");
            eprintln!("    stagehand install");
        }
        other => {
            eprintln!("Failed to start {}: {}", name, other);
        }
    }
}

/// How the delegate terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    /// Normal exit with a code.
    Code(i32),
    /// Killed by a signal (Unix only).
    #[cfg_attr(not(unix), allow(dead_code))]
    Signal(i32),
    /// The platform reported neither a code nor a signal.
    Unknown,
}

/// Classify an exit status.
fn termination(status: ExitStatus) -> Termination {
    if let Some(code) = status.code() {
        return Termination::Code(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Termination::Signal(signal);
        }
    }

    Termination::Unknown
}

/// Exit mirroring the delegate's termination. Never returns.
fn exit_like(status: ExitStatus) -> ! {
    match termination(status) {
        Termination::Code(code) => std::process::exit(code),
        Termination::Signal(signal) => deliver_signal(signal),
        Termination::Unknown => std::process::exit(1),
    }
}

/// Re-deliver a fatal signal to this process.
#[cfg(unix)]
fn deliver_signal(signal: i32) -> ! {
    // SAFETY: restoring a default disposition and raising a signal are
    // plain libc calls with no state shared with the Rust runtime here.
    unsafe {
        libc::signal(signal, libc::SIG_DFL);
        libc::raise(signal);
    }
    // The raise did not terminate us (signal blocked by the parent's
    // mask); fall back to the conventional shell encoding.
    std::process::exit(128 + signal);
}

#[cfg(not(unix))]
fn deliver_signal(_signal: i32) -> ! {
    std::process::exit(1);
}
